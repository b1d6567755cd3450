//! Record store: schema, models and per-entity queries

pub mod artists;
pub mod init;
pub mod models;
pub mod shows;
pub mod venues;

pub use init::{create_schema, init_database, init_in_memory};
pub use models::*;
