//! Trending command

use crate::api::client::ApiClient;
use crate::commands::{print_heading, print_video_line};
use crate::error::Result;

/// Run the trending command
pub async fn run(server_url: String) -> Result<()> {
    let client = ApiClient::new(server_url)?;
    let videos = client.trending().await?;

    print_heading("Trending this week");
    if videos.is_empty() {
        println!("  Nothing is trending right now - check back later.");
        return Ok(());
    }

    for video in &videos {
        print_video_line(video);
    }

    Ok(())
}
