// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Navikit Core
//!
//! Core types and domain logic for the Navikit workspace.
//!
//! This crate provides the foundational abstractions used across all other
//! Navikit crates, including:
//!
//! - The canonical billable service table with monthly free-tier limits
//! - Usage aggregation from raw billing line items
//!
//! ## Key Types
//!
//! - [`ServiceKind`] - Enum of the six billable Maps services
//! - [`UsageLineItem`] - One raw billing record (label, quantity, cost)
//! - [`ServiceUsage`] - Aggregated usage for one service
//! - [`UsageReport`] - Full per-month report with warnings and total cost

pub mod models;

// Re-export all model types
pub use models::{
    // Service table
    ServiceKind,
    WARNING_THRESHOLD,
    // Usage aggregation
    ServiceUsage,
    UsageLineItem,
    UsageReport,
    UsageWarning,
    aggregate,
};
