//! OptiWave CLI Library
//!
//! Command-line client for the OptiWave video catalog. Each subcommand maps
//! to one catalog page and performs a single request cycle against the
//! server:
//!
//! - `home` - featured plus recent uploads
//! - `search` - term/category search with the category allow-list
//! - `trending` - the trailing-week list
//! - `watch` - one record's detail page (counts as a view)
//! - `upload` - authenticated multipart upload
//! - `register` / `login` / `logout` - session management

pub mod api;
pub mod commands;
pub mod error;
pub mod session;

pub use error::{CliError, Result};

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default server URL when neither the flag nor the environment provides one.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

/// OptiWave - programming and tech education videos
#[derive(Parser)]
#[command(name = "optiwave", version, about)]
pub struct Cli {
    /// OptiWave server URL
    #[arg(long, global = true, env = "OPTIWAVE_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub server_url: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show featured videos and recent uploads
    Home,

    /// Search the catalog
    Search {
        /// Search term matched against titles, descriptions, and tags
        term: Option<String>,

        /// Restrict results to one category
        #[arg(long)]
        category: Option<String>,

        /// Result page (1-indexed)
        #[arg(long, default_value_t = 1)]
        page: i64,

        /// Results per page
        #[arg(long, default_value_t = 10)]
        limit: i64,
    },

    /// Show videos trending over the last week
    Trending,

    /// Show one video's details (counts as a view)
    Watch {
        /// Video id
        id: i64,
    },

    /// Upload a video (requires login)
    Upload {
        /// Path of the video file
        #[arg(long)]
        file: PathBuf,

        /// Video title
        #[arg(long)]
        title: String,

        /// Optional description
        #[arg(long)]
        description: Option<String>,

        /// Category from the allow-list
        #[arg(long)]
        category: String,

        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,
    },

    /// Create an account and sign in
    Register {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        name: String,
    },

    /// Sign in with existing credentials
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Discard the stored session
    Logout,
}
