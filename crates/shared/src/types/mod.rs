//! Common types used across the application.

pub mod id;
pub mod money;
pub mod pagination;

pub use id::*;
pub use money::{
    CURRENCY_SCALE, MAX_AMOUNT, TOLERANCE, checked_total, round_currency,
    within_tolerance,
};
pub use pagination::{PageMeta, PageRequest, PageResponse};
