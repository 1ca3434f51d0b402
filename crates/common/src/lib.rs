//! Common types and utilities for the order tracker
//!
//! This crate provides the shared domain primitives used by every other
//! crate in the workspace.
//!
//! # Modules
//!
//! - [`error`] - Common error types
//! - [`types`] - Shared domain types (OrderId, Side, Price, Quantity)

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
