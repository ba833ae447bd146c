//! Account feature
//!
//! Registration and login. Both return the account's public details plus a
//! bearer token for the upload endpoint.

pub mod commands;
pub mod routes;

pub use routes::accounts_routes;
