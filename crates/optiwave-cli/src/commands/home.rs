//! Home command
//!
//! Fetches the featured list and a short recent list concurrently and
//! renders the two sections independently.

use crate::api::client::ApiClient;
use crate::commands::{print_heading, print_video_line};
use crate::error::Result;
use tracing::debug;

/// The home page shows this many recent records.
const RECENT_COUNT: i64 = 12;

/// Run the home command
pub async fn run(server_url: String) -> Result<()> {
    let client = ApiClient::new(server_url)?;

    let (featured, recent) = tokio::join!(
        client.featured(),
        client.list_videos(Some(1), Some(RECENT_COUNT), None, None),
    );

    let featured = featured?;
    let recent = recent?;

    debug!(
        featured = featured.len(),
        recent = recent.videos.len(),
        "Home lists fetched"
    );

    print_heading("Featured");
    if featured.is_empty() {
        println!("  No featured videos yet.");
    } else {
        for video in &featured {
            print_video_line(video);
        }
    }

    println!();
    print_heading("Recent uploads");
    if recent.videos.is_empty() {
        println!("  Nothing has been uploaded yet.");
    } else {
        for video in &recent.videos {
            print_video_line(video);
        }
    }

    Ok(())
}
