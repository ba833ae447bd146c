//! Trending videos query
//!
//! Candidates are records created within the trailing seven days; the lower
//! bound is inclusive, so a record exactly seven days old still qualifies.

use optiwave_common::Video;
use sqlx::SqlitePool;

use crate::features::videos::types::{into_videos, VideoRow, VIDEO_SELECT};

/// Trending lists are capped at twenty records.
const TRENDING_CAP: i64 = 20;

/// Errors that can occur when fetching trending videos
#[derive(Debug, thiserror::Error)]
pub enum TrendingVideosError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Handles the trending query
///
/// Most viewed within the window first, ties broken by newest creation time.
#[tracing::instrument(skip(pool))]
pub async fn handle(pool: SqlitePool) -> Result<Vec<Video>, TrendingVideosError> {
    let sql = format!(
        "{VIDEO_SELECT} \
         WHERE datetime(v.created_at) >= datetime('now', '-7 days') \
         ORDER BY v.views DESC, v.created_at DESC \
         LIMIT ?1"
    );

    let rows: Vec<VideoRow> = sqlx::query_as(&sql)
        .bind(TRENDING_CAP)
        .fetch_all(&pool)
        .await?;

    Ok(into_videos(rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{seed_account, seed_video, VideoSeed};

    #[sqlx::test]
    async fn test_excludes_records_outside_window(pool: SqlitePool) {
        let account = seed_account(&pool, "ada@example.com", "Ada").await;
        seed_video(
            &pool,
            account,
            VideoSeed {
                title: "Fresh".to_string(),
                age_days: 2,
                views: 1,
                ..Default::default()
            },
        )
        .await;
        seed_video(
            &pool,
            account,
            VideoSeed {
                title: "Stale".to_string(),
                age_days: 8,
                views: 1000,
                ..Default::default()
            },
        )
        .await;

        let videos = handle(pool).await.unwrap();
        let titles: Vec<_> = videos.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, vec!["Fresh"]);
    }

    #[sqlx::test]
    async fn test_orders_by_views_then_recency(pool: SqlitePool) {
        let account = seed_account(&pool, "ada@example.com", "Ada").await;
        seed_video(
            &pool,
            account,
            VideoSeed {
                title: "Popular".to_string(),
                age_days: 3,
                views: 90,
                ..Default::default()
            },
        )
        .await;
        seed_video(
            &pool,
            account,
            VideoSeed {
                title: "Quiet new".to_string(),
                age_days: 1,
                views: 2,
                ..Default::default()
            },
        )
        .await;
        seed_video(
            &pool,
            account,
            VideoSeed {
                title: "Quiet old".to_string(),
                age_days: 5,
                views: 2,
                ..Default::default()
            },
        )
        .await;

        let videos = handle(pool).await.unwrap();
        let titles: Vec<_> = videos.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, vec!["Popular", "Quiet new", "Quiet old"]);
    }

    #[sqlx::test]
    async fn test_caps_at_twenty(pool: SqlitePool) {
        let account = seed_account(&pool, "ada@example.com", "Ada").await;
        for i in 0..25 {
            seed_video(
                &pool,
                account,
                VideoSeed {
                    title: format!("Video {}", i),
                    views: i,
                    ..Default::default()
                },
            )
            .await;
        }

        let videos = handle(pool).await.unwrap();
        assert_eq!(videos.len(), 20);
    }
}
