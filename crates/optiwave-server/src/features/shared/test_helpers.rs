//! Seed helpers for store-backed tests

use sqlx::SqlitePool;
use uuid::Uuid;

/// Insert an account and return its id.
pub async fn seed_account(pool: &SqlitePool, email: &str, name: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO accounts (email, password_hash, name) VALUES (?1, ?2, ?3) RETURNING id",
    )
    .bind(email)
    .bind("salt$digest")
    .bind(name)
    .fetch_one(pool)
    .await
    .expect("seed account")
}

/// Adjustable fields for a seeded video row.
pub struct VideoSeed {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub tags: Option<String>,
    pub views: i64,
    pub featured: bool,
    /// Row age in days; 0 means created now.
    pub age_days: i64,
}

impl Default for VideoSeed {
    fn default() -> Self {
        Self {
            title: "Test video".to_string(),
            description: None,
            category: "programming".to_string(),
            tags: None,
            views: 0,
            featured: false,
            age_days: 0,
        }
    }
}

/// Insert a video row and return its id.
pub async fn seed_video(pool: &SqlitePool, account_id: i64, seed: VideoSeed) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO videos \
         (title, description, filename, original_name, mimetype, size, category, tags, \
          account_id, views, featured, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, datetime('now', ?12)) \
         RETURNING id",
    )
    .bind(&seed.title)
    .bind(&seed.description)
    .bind(format!("video-test-{}", Uuid::new_v4().simple()))
    .bind("source.mp4")
    .bind("video/mp4")
    .bind(1024_i64)
    .bind(&seed.category)
    .bind(&seed.tags)
    .bind(account_id)
    .bind(seed.views)
    .bind(seed.featured)
    .bind(format!("-{} days", seed.age_days))
    .fetch_one(pool)
    .await
    .expect("seed video")
}
