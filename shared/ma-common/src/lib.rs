//! Member Access Common Library
//!
//! Data model shared by the access engine and its embedders: tags and their
//! canonicalization, tier/badge configuration, profiles, protected resources
//! and access decisions.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
