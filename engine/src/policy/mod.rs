//! Access policy.
//!
//! Four independent grant rules, evaluated in a fixed order:
//! - Admin role
//! - Badge level
//! - Tag overlap
//! - Individual grant
//!
//! Decisions never fail; denials carry a reason code instead.

pub mod helpers;
pub mod resolver;

pub use helpers::{decide_all, filter_accessible, ResourceDecision};
pub use resolver::{decide, require, AccessDenied};
