//! Row types shared by the video queries

use chrono::NaiveDateTime;
use optiwave_common::{Category, Video};
use sqlx::FromRow;
use std::str::FromStr;

/// Shared SELECT for catalog reads: every endpoint returns the record joined
/// with its uploader's display name.
pub const VIDEO_SELECT: &str = "\
    SELECT v.id, v.title, v.description, v.filename, v.original_name, \
           v.mimetype, v.size, v.category, v.tags, v.account_id, \
           u.name AS uploader_name, v.views, v.featured, v.created_at \
    FROM videos v \
    JOIN accounts u ON v.account_id = u.id";

/// One catalog row as fetched from the store.
#[derive(Debug, FromRow)]
pub struct VideoRow {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub filename: String,
    pub original_name: String,
    pub mimetype: String,
    pub size: i64,
    pub category: String,
    pub tags: Option<String>,
    pub account_id: i64,
    pub uploader_name: String,
    pub views: i64,
    pub featured: bool,
    pub created_at: NaiveDateTime,
}

impl VideoRow {
    /// Convert into the API contract type.
    ///
    /// The category column carries a CHECK constraint, so a parse failure
    /// means the stored row is corrupt; it surfaces as a decode error.
    pub fn into_video(self) -> Result<Video, sqlx::Error> {
        let category =
            Category::from_str(&self.category).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(Video {
            id: self.id,
            title: self.title,
            description: self.description,
            filename: self.filename,
            original_name: self.original_name,
            mimetype: self.mimetype,
            size: self.size,
            category,
            tags: self.tags,
            account_id: self.account_id,
            uploader_name: self.uploader_name,
            views: self.views,
            featured: self.featured,
            created_at: self.created_at,
        })
    }
}

/// Map a batch of rows into contract types.
pub fn into_videos(rows: Vec<VideoRow>) -> Result<Vec<Video>, sqlx::Error> {
    rows.into_iter().map(VideoRow::into_video).collect()
}
