//! Owned account hierarchy, detached from the chart it was built from.

use serde::Serialize;

use super::types::AccountType;

/// One node of an [`AccountTree`].
#[derive(Debug, Clone, Serialize)]
pub struct AccountNode {
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account type.
    pub account_type: AccountType,
    /// Depth in the hierarchy.
    pub level: u8,
    /// Whether the account accepts postings.
    pub active: bool,
    /// Index of the parent node.
    pub parent: Option<usize>,
    /// Indices of the child nodes, in code order.
    pub children: Vec<usize>,
}

/// Account hierarchy with index-based child references.
#[derive(Debug, Clone, Serialize)]
pub struct AccountTree {
    /// Nodes, in account code order.
    pub nodes: Vec<AccountNode>,
    /// Indices of the level-1 nodes.
    pub roots: Vec<usize>,
}

impl AccountTree {
    /// Node indices in depth-first pre-order (parents before children).
    #[must_use]
    pub fn depth_first(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<usize> = self.roots.iter().rev().copied().collect();

        while let Some(index) = stack.pop() {
            order.push(index);
            stack.extend(self.nodes[index].children.iter().rev());
        }

        order
    }
}
