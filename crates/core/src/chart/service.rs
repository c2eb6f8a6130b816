//! Chart of accounts registry.
//!
//! Accounts are stored in a flat vector sorted by code. The hierarchy is kept
//! as index-based adjacency lists so every walk is a plain loop over `usize`.

use std::collections::HashMap;

use partida_shared::types::ChartVersion;

use super::error::ChartError;
use super::tree::{AccountNode, AccountTree};
use super::types::{Account, AccountType};

/// Default structural bound on account depth.
pub const DEFAULT_MAX_LEVEL: u8 = 8;

/// Hierarchical registry of accounts (*plan de cuentas*).
///
/// Read-only after [`ChartOfAccounts::load`] except for the explicit admin
/// edits, which revalidate the whole chart before replacing it.
#[derive(Debug, Clone)]
pub struct ChartOfAccounts {
    accounts: Vec<Account>,
    index: HashMap<String, usize>,
    parents: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    max_level: u8,
    version: ChartVersion,
}

impl Default for ChartOfAccounts {
    fn default() -> Self {
        Self {
            accounts: Vec::new(),
            index: HashMap::new(),
            parents: Vec::new(),
            children: Vec::new(),
            max_level: DEFAULT_MAX_LEVEL,
            version: ChartVersion::default(),
        }
    }
}

impl ChartOfAccounts {
    /// Builds the chart with the default depth bound.
    ///
    /// # Errors
    ///
    /// See [`ChartOfAccounts::load_with_max_level`].
    pub fn load(accounts: Vec<Account>) -> Result<Self, ChartError> {
        Self::load_with_max_level(accounts, DEFAULT_MAX_LEVEL)
    }

    /// Builds the code index and parent/children adjacency.
    ///
    /// Every account is walked to its level-1 root following `parent_code`.
    ///
    /// # Errors
    ///
    /// - `DuplicateCode` if two accounts share a code
    /// - `MissingParent` if a parent code does not resolve, or a level > 1
    ///   account has none
    /// - `CycleDetected` if a walk revisits an account
    /// - `DepthExceeded` if a walk is longer than `max_level`
    /// - `LevelMismatch` if a parent is not exactly one level above its child
    pub fn load_with_max_level(
        mut accounts: Vec<Account>,
        max_level: u8,
    ) -> Result<Self, ChartError> {
        accounts.sort_by(|a, b| a.code.cmp(&b.code));

        let mut index = HashMap::with_capacity(accounts.len());
        for (position, account) in accounts.iter().enumerate() {
            if index.insert(account.code.clone(), position).is_some() {
                return Err(ChartError::DuplicateCode(account.code.clone()));
            }
        }

        let parents = Self::resolve_parents(&accounts, &index)?;

        for start in 0..accounts.len() {
            Self::walk_to_root(&accounts, &parents, start, max_level)?;
        }

        for (position, account) in accounts.iter().enumerate() {
            let parent_level = parents[position].map_or(0, |p| accounts[p].level);
            if parent_level.checked_add(1) != Some(account.level) {
                return Err(ChartError::LevelMismatch {
                    code: account.code.clone(),
                    level: account.level,
                    parent_level,
                });
            }
        }

        // Accounts are sorted, so each child list comes out in code order.
        let mut children = vec![Vec::new(); accounts.len()];
        for (position, parent) in parents.iter().enumerate() {
            if let Some(parent) = parent {
                children[*parent].push(position);
            }
        }

        Ok(Self {
            accounts,
            index,
            parents,
            children,
            max_level,
            version: ChartVersion::default(),
        })
    }

    fn resolve_parents(
        accounts: &[Account],
        index: &HashMap<String, usize>,
    ) -> Result<Vec<Option<usize>>, ChartError> {
        accounts
            .iter()
            .map(|account| match &account.parent_code {
                Some(parent) => {
                    index
                        .get(parent)
                        .copied()
                        .map(Some)
                        .ok_or_else(|| ChartError::MissingParent {
                            code: account.code.clone(),
                            parent: Some(parent.clone()),
                        })
                }
                None if account.level > 1 => Err(ChartError::MissingParent {
                    code: account.code.clone(),
                    parent: None,
                }),
                None => Ok(None),
            })
            .collect()
    }

    fn walk_to_root(
        accounts: &[Account],
        parents: &[Option<usize>],
        start: usize,
        max_level: u8,
    ) -> Result<(), ChartError> {
        let mut visited = vec![false; accounts.len()];
        let mut depth: usize = 0;
        let mut current = start;

        loop {
            if visited[current] {
                return Err(ChartError::CycleDetected(accounts[start].code.clone()));
            }
            visited[current] = true;
            depth += 1;
            if depth > usize::from(max_level) {
                return Err(ChartError::DepthExceeded {
                    code: accounts[start].code.clone(),
                    max_level,
                });
            }
            match parents[current] {
                Some(parent) => current = parent,
                None => return Ok(()),
            }
        }
    }

    // ========== Queries ==========

    /// Number of accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if the chart has no accounts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// All accounts, sorted by code.
    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Generation counter, bumped by every successful admin edit.
    #[must_use]
    pub fn version(&self) -> ChartVersion {
        self.version
    }

    /// The configured depth bound.
    #[must_use]
    pub fn max_level(&self) -> u8 {
        self.max_level
    }

    /// Looks up an account by code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Account> {
        self.index.get(code).map(|&i| &self.accounts[i])
    }

    /// Looks up an account by code.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no account has this code.
    pub fn get_by_code(&self, code: &str) -> Result<&Account, ChartError> {
        self.get(code)
            .ok_or_else(|| ChartError::NotFound(code.to_string()))
    }

    /// Direct children of an account, in code order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no account has this code.
    pub fn get_children(&self, code: &str) -> Result<Vec<&Account>, ChartError> {
        let position = self.position_of(code)?;
        Ok(self.children[position]
            .iter()
            .map(|&c| &self.accounts[c])
            .collect())
    }

    /// All active leaf accounts in the subtree rooted at `code`.
    ///
    /// A leaf queried directly yields itself when active.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no account has this code.
    pub fn get_descendant_leaves(&self, code: &str) -> Result<Vec<&Account>, ChartError> {
        let root = self.position_of(code)?;
        let mut leaves = Vec::new();
        let mut stack = vec![root];

        while let Some(position) = stack.pop() {
            let children = &self.children[position];
            if children.is_empty() {
                let account = &self.accounts[position];
                if account.active {
                    leaves.push(account);
                }
            } else {
                // Reverse so the leaves come out in code order.
                stack.extend(children.iter().rev());
            }
        }

        Ok(leaves)
    }

    /// All accounts of one type, in code order.
    #[must_use]
    pub fn get_by_type(&self, account_type: AccountType) -> Vec<&Account> {
        self.accounts
            .iter()
            .filter(|a| a.account_type == account_type)
            .collect()
    }

    /// All leaf accounts (active or not), in code order.
    pub fn leaves(&self) -> impl Iterator<Item = &Account> + '_ {
        self.accounts
            .iter()
            .enumerate()
            .filter(|(position, _)| self.children[*position].is_empty())
            .map(|(_, account)| account)
    }

    /// Returns true if the account exists and has no children.
    #[must_use]
    pub fn is_leaf(&self, code: &str) -> bool {
        self.index
            .get(code)
            .is_some_and(|&i| self.children[i].is_empty())
    }

    /// Returns the parent of an account, if any.
    #[must_use]
    pub fn parent_of(&self, code: &str) -> Option<&Account> {
        let position = *self.index.get(code)?;
        self.parents[position].map(|p| &self.accounts[p])
    }

    /// Index of an account inside [`ChartOfAccounts::accounts`].
    #[must_use]
    pub fn position(&self, code: &str) -> Option<usize> {
        self.index.get(code).copied()
    }

    /// Child positions of the account at `position`.
    #[must_use]
    pub fn children_at(&self, position: usize) -> &[usize] {
        &self.children[position]
    }

    fn position_of(&self, code: &str) -> Result<usize, ChartError> {
        self.position(code)
            .ok_or_else(|| ChartError::NotFound(code.to_string()))
    }

    /// Builds an owned hierarchy with index-based child references.
    #[must_use]
    pub fn tree(&self) -> AccountTree {
        let nodes = self
            .accounts
            .iter()
            .enumerate()
            .map(|(position, account)| AccountNode {
                code: account.code.clone(),
                name: account.name.clone(),
                account_type: account.account_type,
                level: account.level,
                active: account.active,
                parent: self.parents[position],
                children: self.children[position].clone(),
            })
            .collect();
        let roots = self
            .parents
            .iter()
            .enumerate()
            .filter(|(_, parent)| parent.is_none())
            .map(|(position, _)| position)
            .collect();

        AccountTree { nodes, roots }
    }

    // ========== Admin edits ==========

    /// Adds an account, revalidating the whole chart.
    ///
    /// # Errors
    ///
    /// Same as [`ChartOfAccounts::load_with_max_level`]; the chart is left
    /// unchanged on error.
    pub fn add_account(&mut self, account: Account) -> Result<(), ChartError> {
        let mut accounts = self.accounts.clone();
        accounts.push(account);
        self.replace(accounts)
    }

    /// Enables or disables posting to an account.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no account has this code.
    pub fn set_active(&mut self, code: &str, active: bool) -> Result<(), ChartError> {
        let position = self.position_of(code)?;
        self.accounts[position].active = active;
        self.version = self.version.next();
        Ok(())
    }

    /// Removes an account that has no children and no journal lines.
    ///
    /// `is_referenced` answers whether any journal line uses the code.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no account has this code
    /// - `HasChildren` if other accounts hang from it
    /// - `AccountInUse` if `is_referenced` returns true
    pub fn remove_account<F>(&mut self, code: &str, is_referenced: F) -> Result<Account, ChartError>
    where
        F: Fn(&str) -> bool,
    {
        let position = self.position_of(code)?;
        if !self.children[position].is_empty() {
            return Err(ChartError::HasChildren(code.to_string()));
        }
        if is_referenced(code) {
            return Err(ChartError::AccountInUse(code.to_string()));
        }

        let mut accounts = self.accounts.clone();
        let removed = accounts.remove(position);
        self.replace(accounts)?;
        Ok(removed)
    }

    fn replace(&mut self, accounts: Vec<Account>) -> Result<(), ChartError> {
        let version = self.version.next();
        *self = Self::load_with_max_level(accounts, self.max_level)?;
        self.version = version;
        Ok(())
    }
}
