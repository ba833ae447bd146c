//! Search command
//!
//! One query cycle: fetch the category allow-list, validate the requested
//! filter against it, run the search, render the results. Re-running the
//! command with a new term or category is the "change" cycle.

use crate::api::client::ApiClient;
use crate::commands::{print_heading, print_video_line};
use crate::error::{CliError, Result};
use colored::Colorize;
use tracing::debug;

/// Run the search command
pub async fn run(
    term: Option<String>,
    category: Option<String>,
    page: i64,
    limit: i64,
    server_url: String,
) -> Result<()> {
    if page < 1 {
        return Err(CliError::input("Page must be greater than 0"));
    }
    if !(1..=100).contains(&limit) {
        return Err(CliError::input("Limit must be between 1 and 100"));
    }

    let client = ApiClient::new(server_url)?;

    let categories = client.categories().await?;

    if let Some(requested) = category.as_deref() {
        if !categories.iter().any(|c| c.as_str() == requested) {
            let allowed: Vec<_> = categories.iter().map(|c| c.as_str()).collect();
            return Err(CliError::input(format!(
                "Unknown category '{}'. Available: {}",
                requested,
                allowed.join(", ")
            )));
        }
    }

    let term = term.filter(|t| !t.trim().is_empty());

    debug!(term = ?term, category = ?category, page, limit, "Searching catalog");

    let response = client
        .list_videos(Some(page), Some(limit), category.as_deref(), term.as_deref())
        .await?;

    match (&term, &category) {
        (Some(t), Some(c)) => print_heading(&format!("Results for '{}' in {}", t, c)),
        (Some(t), None) => print_heading(&format!("Results for '{}'", t)),
        (None, Some(c)) => print_heading(&format!("Videos in {}", c)),
        (None, None) => print_heading("All videos"),
    }

    if response.videos.is_empty() {
        println!("  No videos matched. Try a different term or category.");
    } else {
        for video in &response.videos {
            print_video_line(video);
        }
        println!();
        println!(
            "{}",
            format!(
                "Page {} ({} of {} total)",
                response.page,
                response.videos.len(),
                response.total
            )
            .dimmed()
        );
    }

    println!();
    let names: Vec<_> = categories.iter().map(|c| c.as_str()).collect();
    println!("{} {}", "Categories:".dimmed(), names.join(", "));

    Ok(())
}
