//! API endpoint URL builders
//!
//! Helper functions to construct API endpoint URLs.

/// Build health check URL
pub fn health_url(base_url: &str) -> String {
    format!("{}/health", base_url)
}

/// Build register endpoint URL
pub fn register_url(base_url: &str) -> String {
    format!("{}/api/auth/register", base_url)
}

/// Build login endpoint URL
pub fn login_url(base_url: &str) -> String {
    format!("{}/api/auth/login", base_url)
}

/// Build upload endpoint URL
pub fn upload_url(base_url: &str) -> String {
    format!("{}/api/videos/upload", base_url)
}

/// Build catalog list URL with optional filters
pub fn videos_url(
    base_url: &str,
    page: Option<i64>,
    limit: Option<i64>,
    category: Option<&str>,
    search: Option<&str>,
) -> String {
    fn push(fragment: String, url: &mut String, sep: &mut char) {
        url.push(*sep);
        url.push_str(&fragment);
        *sep = '&';
    }

    let mut url = format!("{}/api/videos", base_url);
    let mut sep = '?';

    if let Some(p) = page {
        push(format!("page={}", p), &mut url, &mut sep);
    }
    if let Some(l) = limit {
        push(format!("limit={}", l), &mut url, &mut sep);
    }
    if let Some(c) = category {
        push(format!("category={}", urlencoding::encode(c)), &mut url, &mut sep);
    }
    if let Some(s) = search {
        push(format!("search={}", urlencoding::encode(s)), &mut url, &mut sep);
    }

    url
}

/// Build featured list URL
pub fn featured_url(base_url: &str) -> String {
    format!("{}/api/videos/featured", base_url)
}

/// Build trending list URL
pub fn trending_url(base_url: &str) -> String {
    format!("{}/api/videos/trending", base_url)
}

/// Build video detail URL
pub fn video_url(base_url: &str, id: i64) -> String {
    format!("{}/api/videos/{}", base_url, id)
}

/// Build category allow-list URL
pub fn categories_url(base_url: &str) -> String {
    format!("{}/api/videos/categories/list", base_url)
}

/// Build the public stream URL for a stored filename
pub fn stream_url(base_url: &str, filename: &str) -> String {
    format!("{}/uploads/{}", base_url, filename)
}
