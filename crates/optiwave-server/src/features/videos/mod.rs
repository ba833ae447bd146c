//! Video catalog feature
//!
//! The core of the service: upload (write) and the catalog queries
//! (list/search, featured, trending, detail with view counting, category
//! allow-list).

pub mod commands;
pub mod queries;
pub mod routes;
pub mod types;

pub use routes::videos_routes;
