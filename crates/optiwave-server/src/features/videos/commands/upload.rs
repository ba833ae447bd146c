//! Upload command
//!
//! Validates the submission, writes the binary under a server-generated
//! name, then inserts the metadata row. The insert is the commit point: if
//! it fails, the stored binary is removed so no file survives without a
//! record.

use chrono::NaiveDateTime;
use optiwave_common::{Category, Video, ALLOWED_VIDEO_MIME_TYPES, MAX_VIDEO_BYTES};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::str::FromStr;

use crate::features::shared::validation::{
    validate_optional_text, validate_required_text, TextValidationError, MAX_DESCRIPTION_LEN,
    MAX_TITLE_LEN,
};
use crate::storage::MediaStore;

/// A validated-on-handle upload submission.
///
/// `category` and `mimetype` arrive as raw client strings; membership in
/// the respective allow-lists is part of validation, not deserialization,
/// so rejections can echo what was submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadVideoCommand {
    pub account_id: i64,
    pub uploader_name: String,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Option<String>,
    pub original_name: String,
    pub mimetype: Option<String>,
    #[serde(skip)]
    pub content: Vec<u8>,
}

/// Errors that can occur during upload
#[derive(Debug, thiserror::Error)]
pub enum UploadVideoError {
    #[error(transparent)]
    Text(#[from] TextValidationError),
    #[error("Category is required")]
    CategoryRequired,
    #[error("Invalid category '{0}'. Only programming and educational tech content is allowed.")]
    InvalidCategory(String),
    #[error("A video file is required")]
    FileRequired,
    #[error("Unsupported content kind '{0}'. Only video files are allowed.")]
    UnsupportedMedia(String),
    #[error("File of {0} bytes exceeds the {limit} byte limit", limit = MAX_VIDEO_BYTES)]
    PayloadTooLarge(u64),
    #[error("Invalid multipart request: {0}")]
    Multipart(String),
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl UploadVideoCommand {
    /// Validate the submission. Metadata is checked before the file; every
    /// check runs before anything is written.
    pub fn validate(&self) -> Result<Category, UploadVideoError> {
        validate_required_text(&self.title, "Title", MAX_TITLE_LEN)?;
        validate_optional_text(self.description.as_deref(), "Description", MAX_DESCRIPTION_LEN)?;

        let raw_category = self
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(UploadVideoError::CategoryRequired)?;
        let category = Category::from_str(raw_category)
            .map_err(|_| UploadVideoError::InvalidCategory(raw_category.to_string()))?;

        if self.content.is_empty() {
            return Err(UploadVideoError::FileRequired);
        }

        let mimetype = self.mimetype.as_deref().unwrap_or("");
        if !ALLOWED_VIDEO_MIME_TYPES.contains(&mimetype) {
            return Err(UploadVideoError::UnsupportedMedia(mimetype.to_string()));
        }

        if self.content.len() as u64 > MAX_VIDEO_BYTES {
            return Err(UploadVideoError::PayloadTooLarge(self.content.len() as u64));
        }

        Ok(category)
    }
}

/// Handles the upload command
///
/// Returns the created record with its server-assigned id and a view count
/// of zero.
#[tracing::instrument(skip(pool, media, command), fields(account_id = command.account_id, title = %command.title))]
pub async fn handle(
    pool: SqlitePool,
    media: MediaStore,
    command: UploadVideoCommand,
) -> Result<Video, UploadVideoError> {
    let category = command.validate()?;

    let filename = MediaStore::generate_filename(&command.original_name);
    let size = command.content.len() as i64;
    let mimetype = command.mimetype.clone().unwrap_or_default();

    media.save(&filename, &command.content).await?;

    let description = command
        .description
        .clone()
        .filter(|d| !d.trim().is_empty());
    let tags = command.tags.clone().filter(|t| !t.trim().is_empty());

    let inserted: Result<(i64, NaiveDateTime), sqlx::Error> = sqlx::query_as(
        "INSERT INTO videos \
         (title, description, filename, original_name, mimetype, size, category, tags, account_id) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9) \
         RETURNING id, created_at",
    )
    .bind(&command.title)
    .bind(&description)
    .bind(&filename)
    .bind(&command.original_name)
    .bind(&mimetype)
    .bind(size)
    .bind(category.as_str())
    .bind(&tags)
    .bind(command.account_id)
    .fetch_one(&pool)
    .await;

    let (id, created_at) = match inserted {
        Ok(row) => row,
        Err(e) => {
            // The insert is the commit point; drop the binary so it does not
            // dangle without a record.
            if let Err(cleanup) = media.remove(&filename).await {
                tracing::warn!(
                    filename = %filename,
                    error = %cleanup,
                    "Failed to remove stored binary after insert failure"
                );
            }
            return Err(e.into());
        },
    };

    tracing::info!(video_id = id, filename = %filename, size, "Video uploaded");

    Ok(Video {
        id,
        title: command.title,
        description,
        filename,
        original_name: command.original_name,
        mimetype,
        size,
        category,
        tags,
        account_id: command.account_id,
        uploader_name: command.uploader_name,
        views: 0,
        featured: false,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::seed_account;
    use tempfile::TempDir;

    fn command(account_id: i64) -> UploadVideoCommand {
        UploadVideoCommand {
            account_id,
            uploader_name: "Ada".to_string(),
            title: "Intro to Rust".to_string(),
            description: Some("Ownership from first principles".to_string()),
            category: Some("programming".to_string()),
            tags: Some("rust,beginners".to_string()),
            original_name: "intro-to-rust.mp4".to_string(),
            mimetype: Some("video/mp4".to_string()),
            content: b"fake video bytes".to_vec(),
        }
    }

    async fn store() -> (TempDir, MediaStore) {
        let dir = TempDir::new().unwrap();
        let media = MediaStore::new(dir.path());
        media.init().await.unwrap();
        (dir, media)
    }

    async fn video_count(pool: &SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM videos")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[test]
    fn test_validation_rejects_missing_title() {
        let mut cmd = command(1);
        cmd.title = "  ".to_string();
        assert!(matches!(cmd.validate(), Err(UploadVideoError::Text(_))));
    }

    #[test]
    fn test_validation_rejects_missing_category() {
        let mut cmd = command(1);
        cmd.category = None;
        assert!(matches!(
            cmd.validate(),
            Err(UploadVideoError::CategoryRequired)
        ));
    }

    #[test]
    fn test_validation_rejects_unknown_category() {
        let mut cmd = command(1);
        cmd.category = Some("cooking".to_string());
        assert!(matches!(
            cmd.validate(),
            Err(UploadVideoError::InvalidCategory(c)) if c == "cooking"
        ));
    }

    #[test]
    fn test_validation_rejects_missing_file() {
        let mut cmd = command(1);
        cmd.content = Vec::new();
        assert!(matches!(cmd.validate(), Err(UploadVideoError::FileRequired)));
    }

    #[test]
    fn test_validation_rejects_non_video_kind() {
        let mut cmd = command(1);
        cmd.mimetype = Some("application/pdf".to_string());
        assert!(matches!(
            cmd.validate(),
            Err(UploadVideoError::UnsupportedMedia(kind)) if kind == "application/pdf"
        ));
    }

    #[test]
    fn test_validation_rejects_oversize_file() {
        let mut cmd = command(1);
        cmd.content = vec![0_u8; (MAX_VIDEO_BYTES + 1) as usize];
        assert!(matches!(
            cmd.validate(),
            Err(UploadVideoError::PayloadTooLarge(_))
        ));
    }

    #[test]
    fn test_validation_accepts_every_allowed_kind() {
        for kind in ALLOWED_VIDEO_MIME_TYPES {
            let mut cmd = command(1);
            cmd.mimetype = Some(kind.to_string());
            assert!(cmd.validate().is_ok(), "rejected {kind}");
        }
    }

    #[sqlx::test]
    async fn test_upload_creates_record_and_binary(pool: SqlitePool) {
        let account = seed_account(&pool, "ada@example.com", "Ada").await;
        let (_dir, media) = store().await;

        let video = handle(pool.clone(), media.clone(), command(account))
            .await
            .unwrap();

        assert!(video.id > 0);
        assert_eq!(video.views, 0);
        assert!(!video.featured);
        assert_eq!(video.category, Category::Programming);
        assert_ne!(video.filename, video.original_name);
        assert!(media.exists(&video.filename).await);
        assert_eq!(video_count(&pool).await, 1);
    }

    #[sqlx::test]
    async fn test_rejected_category_creates_nothing(pool: SqlitePool) {
        let account = seed_account(&pool, "ada@example.com", "Ada").await;
        let (dir, media) = store().await;

        let mut cmd = command(account);
        cmd.category = Some("cooking".to_string());

        let result = handle(pool.clone(), media, cmd).await;
        assert!(matches!(result, Err(UploadVideoError::InvalidCategory(_))));
        assert_eq!(video_count(&pool).await, 0);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[sqlx::test]
    async fn test_storage_failure_creates_no_record(pool: SqlitePool) {
        let account = seed_account(&pool, "ada@example.com", "Ada").await;
        let dir = TempDir::new().unwrap();
        // Point at a directory that does not exist so the write fails.
        let media = MediaStore::new(dir.path().join("missing"));

        let result = handle(pool.clone(), media, command(account)).await;
        assert!(matches!(result, Err(UploadVideoError::Storage(_))));
        assert_eq!(video_count(&pool).await, 0);
    }

    #[sqlx::test]
    async fn test_stored_filenames_stay_unique(pool: SqlitePool) {
        let account = seed_account(&pool, "ada@example.com", "Ada").await;
        let (_dir, media) = store().await;

        let first = handle(pool.clone(), media.clone(), command(account))
            .await
            .unwrap();
        let second = handle(pool.clone(), media.clone(), command(account))
            .await
            .unwrap();

        assert_ne!(first.filename, second.filename);
        assert_eq!(video_count(&pool).await, 2);
    }
}
