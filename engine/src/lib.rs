//! Member Access Engine
//!
//! Resolves membership access for already-fetched records: canonical tag
//! sets, deterministic badge colors, and access decisions for protected
//! resources. Pure and synchronous; no storage or network access.

pub mod color;
pub mod config;
pub mod evaluate;
pub mod observability;
pub mod policy;
pub mod records;
pub mod snapshot;
