//! Feature modules implementing the OptiWave API
//!
//! Each feature is a vertical slice with its own commands, queries, and
//! routes:
//!
//! - **accounts**: registration and login
//! - **videos**: the catalog - upload, list/search, featured, trending,
//!   detail (with view counting), and the category allow-list
//!
//! Each feature module follows the structure:
//! - `commands/` - write operations
//! - `queries/` - read operations
//! - `routes.rs` - HTTP route definitions and error-to-response mapping
//!
//! Handlers receive everything they need through [`FeatureState`]; nothing
//! reaches for global state.

pub mod accounts;
pub mod shared;
pub mod videos;

use axum::Router;

use crate::auth::TokenKeys;
use crate::storage::MediaStore;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    /// SQLite connection pool for catalog and account rows
    pub db: sqlx::SqlitePool,
    /// Storage directory for uploaded binaries
    pub media: MediaStore,
    /// Bearer-token signing and verification keys
    pub tokens: TokenKeys,
}

/// Creates the API router with all feature routes mounted
///
/// - `/auth` - registration and login
/// - `/videos` - catalog operations
pub fn router(state: FeatureState) -> Router<()> {
    Router::new()
        .nest("/auth", accounts::accounts_routes())
        .nest("/videos", videos::videos_routes())
        .with_state(state)
}
