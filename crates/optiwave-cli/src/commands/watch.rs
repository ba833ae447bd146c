//! Watch command
//!
//! Fetches one record's detail page. The fetch itself counts as a view on
//! the server; watching the same id again counts again.

use crate::api::client::ApiClient;
use crate::commands::print_video_detail;
use crate::error::{CliError, Result};
use colored::Colorize;

/// Run the watch command
pub async fn run(id: i64, server_url: String) -> Result<()> {
    let client = ApiClient::new(server_url.clone())?;

    match client.get_video(id).await {
        Ok(video) => {
            print_video_detail(&video, &server_url);
            Ok(())
        },
        Err(CliError::VideoNotFound(_)) => {
            println!("{}", format!("Video {} was not found.", id).yellow());
            println!("It may have been removed, or the id is wrong.");
            Ok(())
        },
        Err(e) => Err(e),
    }
}
