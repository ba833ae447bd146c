//! Featured videos query

use optiwave_common::Video;
use sqlx::SqlitePool;

use crate::features::videos::types::{into_videos, VideoRow, VIDEO_SELECT};

/// Featured lists are capped at ten records.
const FEATURED_CAP: i64 = 10;

/// Errors that can occur when fetching featured videos
#[derive(Debug, thiserror::Error)]
pub enum FeaturedVideosError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Handles the featured query
///
/// Records with the featured flag set, most viewed first, ties broken by
/// newest creation time.
#[tracing::instrument(skip(pool))]
pub async fn handle(pool: SqlitePool) -> Result<Vec<Video>, FeaturedVideosError> {
    let sql = format!(
        "{VIDEO_SELECT} \
         WHERE v.featured = 1 \
         ORDER BY v.views DESC, v.created_at DESC \
         LIMIT ?1"
    );

    let rows: Vec<VideoRow> = sqlx::query_as(&sql)
        .bind(FEATURED_CAP)
        .fetch_all(&pool)
        .await?;

    Ok(into_videos(rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{seed_account, seed_video, VideoSeed};

    #[sqlx::test]
    async fn test_returns_only_featured_ordered_by_views(pool: SqlitePool) {
        let account = seed_account(&pool, "ada@example.com", "Ada").await;
        seed_video(
            &pool,
            account,
            VideoSeed {
                title: "Plain".to_string(),
                views: 100,
                ..Default::default()
            },
        )
        .await;
        seed_video(
            &pool,
            account,
            VideoSeed {
                title: "Featured low".to_string(),
                featured: true,
                views: 5,
                ..Default::default()
            },
        )
        .await;
        seed_video(
            &pool,
            account,
            VideoSeed {
                title: "Featured high".to_string(),
                featured: true,
                views: 50,
                ..Default::default()
            },
        )
        .await;

        let videos = handle(pool).await.unwrap();
        let titles: Vec<_> = videos.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, vec!["Featured high", "Featured low"]);
    }

    #[sqlx::test]
    async fn test_caps_at_ten(pool: SqlitePool) {
        let account = seed_account(&pool, "ada@example.com", "Ada").await;
        for i in 0..12 {
            seed_video(
                &pool,
                account,
                VideoSeed {
                    title: format!("Featured {}", i),
                    featured: true,
                    views: i,
                    ..Default::default()
                },
            )
            .await;
        }

        let videos = handle(pool).await.unwrap();
        assert_eq!(videos.len(), 10);
    }

    #[sqlx::test]
    async fn test_empty_when_none_featured(pool: SqlitePool) {
        let account = seed_account(&pool, "ada@example.com", "Ada").await;
        seed_video(&pool, account, VideoSeed::default()).await;

        let videos = handle(pool).await.unwrap();
        assert!(videos.is_empty());
    }
}
