//! Local-disk storage for uploaded binaries
//!
//! Binaries live flat under one directory and are addressed solely by their
//! server-generated stored filename; the client-supplied name is never used
//! as an addressing token.

use chrono::Utc;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Longest extension carried over from the client-supplied name.
const MAX_EXTENSION_LEN: usize = 10;

/// Handle to the upload storage directory, cloned into router state.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    /// Create a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Ensure the storage directory exists.
    pub async fn init(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// The directory uploaded binaries are served from.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Generate a collision-resistant stored filename.
    ///
    /// Shape: `video-<unix millis>-<uuid><ext>`, where `<ext>` is the
    /// sanitized extension of the client-supplied name (alphanumeric only,
    /// lowercased) or nothing if the name has no usable extension.
    pub fn generate_filename(original_name: &str) -> String {
        let extension = Path::new(original_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| {
                !ext.is_empty()
                    && ext.len() <= MAX_EXTENSION_LEN
                    && ext.chars().all(|c| c.is_ascii_alphanumeric())
            })
            .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
            .unwrap_or_default();

        format!(
            "video-{}-{}{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple(),
            extension
        )
    }

    /// Write a binary under the given stored filename.
    pub async fn save(&self, filename: &str, bytes: &[u8]) -> std::io::Result<()> {
        tokio::fs::write(self.root.join(filename), bytes).await
    }

    /// Remove a stored binary. Used to clean up when the metadata insert
    /// fails after the binary was written.
    pub async fn remove(&self, filename: &str) -> std::io::Result<()> {
        tokio::fs::remove_file(self.root.join(filename)).await
    }

    /// Whether a stored binary exists.
    pub async fn exists(&self, filename: &str) -> bool {
        tokio::fs::try_exists(self.root.join(filename))
            .await
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_names_are_unique() {
        let first = MediaStore::generate_filename("lecture.mp4");
        let second = MediaStore::generate_filename("lecture.mp4");
        assert_ne!(first, second);
    }

    #[test]
    fn test_generated_name_keeps_sanitized_extension() {
        let name = MediaStore::generate_filename("My Lecture.MP4");
        assert!(name.starts_with("video-"));
        assert!(name.ends_with(".mp4"));
        assert!(!name.contains("My Lecture"));
    }

    #[test]
    fn test_generated_name_drops_suspect_extension() {
        assert!(!MediaStore::generate_filename("noext").contains('.'));
        assert!(!MediaStore::generate_filename("evil.../../x").ends_with("x"));
        assert!(!MediaStore::generate_filename("a.waytoolongextension").contains('.'));
    }

    #[tokio::test]
    async fn test_save_and_remove_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = MediaStore::new(dir.path());
        store.init().await.unwrap();

        let filename = MediaStore::generate_filename("clip.webm");
        store.save(&filename, b"not really a video").await.unwrap();
        assert!(store.exists(&filename).await);

        store.remove(&filename).await.unwrap();
        assert!(!store.exists(&filename).await);
    }
}
