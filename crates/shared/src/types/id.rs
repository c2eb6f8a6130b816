//! Sequential IDs for ledger-assigned identifiers.
//!
//! Journal entry IDs and ledger and chart versions are gap-free counters
//! handed out by a single owner, so they wrap a `u64` instead of a UUID. Distinct
//! types keep an `EntryId` from being passed where a `LedgerVersion` is expected.

use serde::{Deserialize, Serialize};

/// Macro to generate sequential ID wrappers.
macro_rules! sequence_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// The first value handed out by a fresh counter.
            pub const FIRST: Self = Self(1);

            /// Creates an ID from a raw value.
            #[must_use]
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the raw value.
            #[must_use]
            pub const fn value(self) -> u64 {
                self.0
            }

            /// Returns the value that follows this one.
            #[must_use]
            pub const fn next(self) -> Self {
                Self(self.0 + 1)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }
    };
}

sequence_id!(EntryId, "Identifier of a journal entry, assigned on acceptance.");
sequence_id!(
    LedgerVersion,
    "Generation counter of a ledger, bumped by every successful mutation."
);
sequence_id!(
    ChartVersion,
    "Generation counter of a chart of accounts, bumped by every successful edit."
);
