//! Write operations for the video catalog

pub mod upload;

pub use upload::{UploadVideoCommand, UploadVideoError};
