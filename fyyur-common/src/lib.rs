//! # Fyyur Common Library
//!
//! Shared code for the Fyyur booking service:
//! - Record store (SQLite schema, models and queries)
//! - Catalog service (listings, search, create/update/delete)
//! - Request forms and their validation
//! - Configuration loading
//! - Error taxonomy

pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod forms;

pub use catalog::Catalog;
pub use error::{EntityKind, Error, Result};
