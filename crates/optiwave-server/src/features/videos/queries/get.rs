//! Detail query with view counting
//!
//! Fetching a record by id increments its view count by exactly one as a
//! side effect. Every fetch counts; there is no deduplication by caller.
//! The increment is an unconditional single UPDATE, so concurrent fetches
//! get whatever atomicity the store's statement provides and nothing more.

use optiwave_common::Video;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::features::videos::types::{VideoRow, VIDEO_SELECT};

/// Query to fetch one record by id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetVideoQuery {
    pub id: i64,
}

/// Errors that can occur when fetching a video
#[derive(Debug, thiserror::Error)]
pub enum GetVideoError {
    #[error("Video {0} not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Handles the detail query
///
/// The view count is bumped first; an unknown id is a no-op there and
/// surfaces as NotFound from the fetch.
#[tracing::instrument(skip(pool))]
pub async fn handle(pool: SqlitePool, query: GetVideoQuery) -> Result<Video, GetVideoError> {
    let updated = sqlx::query("UPDATE videos SET views = views + 1 WHERE id = ?1")
        .bind(query.id)
        .execute(&pool)
        .await?;

    if updated.rows_affected() == 0 {
        return Err(GetVideoError::NotFound(query.id));
    }

    let sql = format!("{VIDEO_SELECT} WHERE v.id = ?1");
    let row: VideoRow = sqlx::query_as(&sql)
        .bind(query.id)
        .fetch_optional(&pool)
        .await?
        .ok_or(GetVideoError::NotFound(query.id))?;

    Ok(row.into_video()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{seed_account, seed_video, VideoSeed};

    #[sqlx::test]
    async fn test_each_fetch_increments_views(pool: SqlitePool) {
        let account = seed_account(&pool, "ada@example.com", "Ada").await;
        let id = seed_video(&pool, account, VideoSeed::default()).await;

        for expected in 1..=3 {
            let video = handle(pool.clone(), GetVideoQuery { id }).await.unwrap();
            assert_eq!(video.views, expected);
        }
    }

    #[sqlx::test]
    async fn test_joins_uploader_name(pool: SqlitePool) {
        let account = seed_account(&pool, "ada@example.com", "Ada Lovelace").await;
        let id = seed_video(&pool, account, VideoSeed::default()).await;

        let video = handle(pool, GetVideoQuery { id }).await.unwrap();
        assert_eq!(video.uploader_name, "Ada Lovelace");
        assert_eq!(video.account_id, account);
    }

    #[sqlx::test]
    async fn test_unknown_id_is_not_found(pool: SqlitePool) {
        let result = handle(pool, GetVideoQuery { id: 999 }).await;
        assert!(matches!(result, Err(GetVideoError::NotFound(999))));
    }

    #[sqlx::test]
    async fn test_unknown_id_leaves_counts_untouched(pool: SqlitePool) {
        let account = seed_account(&pool, "ada@example.com", "Ada").await;
        let id = seed_video(&pool, account, VideoSeed::default()).await;

        let _ = handle(pool.clone(), GetVideoQuery { id: 999 }).await;

        let views: i64 = sqlx::query_scalar("SELECT views FROM videos WHERE id = ?1")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(views, 0);
    }
}
