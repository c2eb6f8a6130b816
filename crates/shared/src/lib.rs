//! Shared types, errors, and configuration for Partida.
//!
//! This crate provides common types used across all other crates:
//! - Currency rounding and tolerance helpers over `Decimal`
//! - Sequential IDs for journal entries and ledger versions
//! - Pagination types for list endpoints
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
