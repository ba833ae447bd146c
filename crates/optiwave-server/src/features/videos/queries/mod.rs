//! Read operations for the video catalog

pub mod featured;
pub mod get;
pub mod list;
pub mod trending;

pub use featured::FeaturedVideosError;
pub use get::{GetVideoError, GetVideoQuery};
pub use list::{ListVideosError, ListVideosQuery};
pub use trending::TrendingVideosError;
