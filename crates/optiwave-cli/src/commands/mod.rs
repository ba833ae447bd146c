//! CLI command implementations
//!
//! One module per catalog page. Each command performs a single read (or
//! write) cycle against the server and renders the outcome; nothing is held
//! between invocations except the login session.

pub mod home;
pub mod login;
pub mod logout;
pub mod register;
pub mod search;
pub mod trending;
pub mod upload;
pub mod watch;

use crate::api::endpoints;
use colored::Colorize;
use optiwave_common::Video;

/// Print a section heading.
pub(crate) fn print_heading(title: &str) {
    println!("{}", title.bold().underline());
}

/// Print one catalog record as a list line.
pub(crate) fn print_video_line(video: &Video) {
    println!(
        "  {}  {}  {}  {}",
        format!("#{}", video.id).dimmed(),
        video.title.bold(),
        format!("[{}]", video.category).cyan(),
        format!("{} views, by {}", video.views, video.uploader_name).dimmed(),
    );
}

/// Print a full detail page for one record.
pub(crate) fn print_video_detail(video: &Video, server_url: &str) {
    println!();
    println!("{}", video.title.bold().underline());
    println!(
        "{}",
        format!(
            "#{} - {} - uploaded by {} - {} views",
            video.id, video.category, video.uploader_name, video.views
        )
        .dimmed()
    );

    if let Some(description) = &video.description {
        println!();
        println!("{}", description);
    }

    if let Some(tags) = &video.tags {
        println!();
        println!("{} {}", "Tags:".dimmed(), tags);
    }

    println!();
    println!(
        "{} {}",
        "Stream:".dimmed(),
        endpoints::stream_url(server_url, &video.filename).blue()
    );
}
