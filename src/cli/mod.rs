//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand.

mod compare;
mod hash;
mod history;

pub use compare::run_compare;
pub use hash::run_hash;
pub use history::run_history;

// Re-export config types used by handlers
pub use crate::config::{CompareConfig, HashConfig, HistoryConfig};
