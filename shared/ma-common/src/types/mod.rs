//! Shared Types

pub mod access;
pub mod config;
pub mod tag;

pub use access::*;
pub use config::*;
pub use tag::*;
