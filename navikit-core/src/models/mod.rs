//! Domain models for Navikit.
//!
//! ## Submodules
//!
//! - [`service`] - The canonical billable service table and label matching
//! - [`usage`] - Usage aggregation (line items, per-service rates, warnings)

mod service;
mod usage;

// Re-export everything at the models level
pub use service::{ServiceKind, WARNING_THRESHOLD};
pub use usage::{ServiceUsage, UsageLineItem, UsageReport, UsageWarning, aggregate};

#[cfg(test)]
mod serde_tests;
