//! Shared types and utilities for OptiWave components.
//!
//! This crate holds everything the server and the CLI client must agree on:
//!
//! - **API contract** ([`types`]): the request/response payloads exchanged
//!   over the REST boundary, including the closed [`types::Category`]
//!   allow-list and the accepted video content kinds. Both sides deserialize
//!   against these structs instead of ad-hoc JSON shapes.
//! - **Logging** ([`logging`]): centralized tracing initialization with
//!   console/file targets, text/JSON formats, and environment-based
//!   configuration.

pub mod logging;
pub mod types;

pub use types::{
    AccountInfo, ApiResponse, AuthResponse, Category, ErrorDetail, ErrorResponse, Video,
    VideoListResponse, ALLOWED_VIDEO_MIME_TYPES, MAX_VIDEO_BYTES,
};
