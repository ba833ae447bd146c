//! Upload command
//!
//! Requires a stored login session. File presence, title, and category are
//! checked client-side before anything is sent; after a successful upload
//! the new record's detail page is fetched and rendered following a short
//! fixed delay.

use crate::api::client::{ApiClient, UploadSubmission};
use crate::commands::print_video_detail;
use crate::error::{CliError, Result};
use crate::session::Session;
use colored::Colorize;
use optiwave_common::Category;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Pause before showing the uploaded record's detail page.
const DETAIL_DELAY: Duration = Duration::from_secs(2);

/// Run the upload command
pub async fn run(
    file: PathBuf,
    title: String,
    description: Option<String>,
    category: String,
    tags: Option<String>,
    server_url: String,
) -> Result<()> {
    let session = Session::load()?
        .ok_or_else(|| CliError::Unauthorized("uploading requires a session".to_string()))?;

    // Client-side checks mirror the server's required fields so obviously
    // bad submissions never leave the machine.
    if !file.is_file() {
        return Err(CliError::FileNotFound(file.display().to_string()));
    }
    if title.trim().is_empty() {
        return Err(CliError::input("Title cannot be empty"));
    }
    let category = Category::from_str(category.trim()).map_err(|_| {
        let allowed: Vec<_> = Category::ALL.iter().map(|c| c.as_str()).collect();
        CliError::input(format!(
            "Unknown category '{}'. Available: {}",
            category.trim(),
            allowed.join(", ")
        ))
    })?;

    let mimetype = mime_for_path(&file).ok_or_else(|| {
        CliError::input(format!(
            "'{}' does not look like a supported video file (mp4, mpeg, mov, webm, avi)",
            file.display()
        ))
    })?;

    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("video")
        .to_string();
    let content = tokio::fs::read(&file).await?;

    info!(file = %file.display(), size = content.len(), "Submitting upload");
    println!("Uploading {}...", file_name.bold());

    let client = ApiClient::new(server_url.clone())?.with_token(&session.token);
    let video = client
        .upload(UploadSubmission {
            file_name,
            mimetype: mimetype.to_string(),
            content,
            title,
            description,
            category: category.as_str().to_string(),
            tags,
        })
        .await?;

    println!(
        "{} Video uploaded with id {}.",
        "Done.".green().bold(),
        video.id
    );

    tokio::time::sleep(DETAIL_DELAY).await;

    let detail = client.get_video(video.id).await?;
    print_video_detail(&detail, &server_url);

    Ok(())
}

/// Map a file extension to its video content kind.
fn mime_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "mp4" | "m4v" => Some("video/mp4"),
        "mpeg" | "mpg" => Some("video/mpeg"),
        "mov" | "qt" => Some("video/quicktime"),
        "webm" => Some("video/webm"),
        "avi" => Some("video/x-msvideo"),
        _ => None,
    }
}
