//! HTTP API handlers

pub mod artists;
pub mod error;
pub mod extract;
pub mod health;
pub mod index;
pub mod shows;
pub mod venues;

pub use error::ApiError;
pub use health::health_routes;
pub use index::serve_index;
