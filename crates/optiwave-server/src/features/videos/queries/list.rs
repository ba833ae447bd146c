//! List/search query
//!
//! Paginated catalog listing with optional exact category filtering and
//! case-insensitive substring search across title, description, and tags.

use optiwave_common::{Category, VideoListResponse};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::features::shared::pagination::PaginationParams;
use crate::features::videos::types::{into_videos, VideoRow, VIDEO_SELECT};

/// Query parameters for `GET /api/videos`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ListVideosQuery {
    #[serde(flatten)]
    pub pagination: PaginationParams,
    /// Exact category filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Substring searched in title, description, and tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Errors that can occur when listing videos
#[derive(Debug, thiserror::Error)]
pub enum ListVideosError {
    #[error("Page must be greater than 0")]
    InvalidPage,
    #[error("Limit must be between 1 and 100")]
    InvalidLimit,
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl ListVideosQuery {
    /// Validates the query parameters
    pub fn validate(&self) -> Result<(), ListVideosError> {
        self.pagination.validate().map_err(|msg| match msg {
            "Page must be greater than 0" => ListVideosError::InvalidPage,
            _ => ListVideosError::InvalidLimit,
        })
    }
}

/// Handles the list query
///
/// Ordered by creation time descending; `total` is the full filtered count,
/// independent of the page window.
#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: SqlitePool,
    query: ListVideosQuery,
) -> Result<VideoListResponse, ListVideosError> {
    query.validate()?;

    let page = query.pagination.page();
    let limit = query.pagination.limit();
    let offset = query.pagination.offset();

    let category = query.category.map(|c| c.as_str().to_string());
    let search = query
        .search
        .as_deref()
        .filter(|term| !term.trim().is_empty())
        .map(|term| format!("%{}%", term));

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM videos v \
         WHERE (?1 IS NULL OR v.category = ?1) \
           AND (?2 IS NULL OR v.title LIKE ?2 OR v.description LIKE ?2 OR v.tags LIKE ?2)",
    )
    .bind(&category)
    .bind(&search)
    .fetch_one(&pool)
    .await?;

    let sql = format!(
        "{VIDEO_SELECT} \
         WHERE (?1 IS NULL OR v.category = ?1) \
           AND (?2 IS NULL OR v.title LIKE ?2 OR v.description LIKE ?2 OR v.tags LIKE ?2) \
         ORDER BY v.created_at DESC \
         LIMIT ?3 OFFSET ?4"
    );

    let rows: Vec<VideoRow> = sqlx::query_as(&sql)
        .bind(&category)
        .bind(&search)
        .bind(limit)
        .bind(offset)
        .fetch_all(&pool)
        .await?;

    Ok(VideoListResponse {
        videos: into_videos(rows)?,
        page,
        limit,
        total,
    })
}
