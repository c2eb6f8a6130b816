//! Tax penalty calculator for late declarations.
//!
//! Stateless: every call takes its constants from a [`PenaltyConfig`].

pub mod error;
pub mod penalty;
pub mod types;

#[cfg(test)]
mod penalty_props;

pub use error::TaxError;
pub use penalty::calculate_penalty;
pub use types::{DeclarationType, PenaltyConfig, PenaltyResult, TaxDeclaration};
