//! HTTP API client for the OptiWave server
//!
//! Typed methods over the REST API; every response deserializes against the
//! shared contract types in `optiwave-common`.

use crate::api::endpoints;
use crate::error::{CliError, Result};
use optiwave_common::{ApiResponse, AuthResponse, Category, ErrorResponse, Video, VideoListResponse};
use reqwest::{multipart, Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

// ============================================================================
// API Client Constants
// ============================================================================

/// Default timeout for API requests in seconds.
/// Can be overridden via OPTIWAVE_API_TIMEOUT_SECS; generous to accommodate
/// large uploads.
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 300;

/// Default OptiWave server URL when not specified via environment variable.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";

/// A video upload submission.
#[derive(Debug, Clone)]
pub struct UploadSubmission {
    pub file_name: String,
    pub mimetype: String,
    pub content: Vec<u8>,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub tags: Option<String>,
}

/// API client for the OptiWave server
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: String) -> Result<Self> {
        let timeout_secs = std::env::var("OPTIWAVE_API_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_API_TIMEOUT_SECS);

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("OPTIWAVE_SERVER_URL")
            .unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());

        Self::new(base_url)
    }

    /// Attach a bearer token for authenticated requests
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Unwrap a response: success payloads come wrapped in `ApiResponse`,
    /// failures carry an `ErrorResponse` body with a user-facing message.
    async fn unwrap_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            let wrapped: ApiResponse<T> = response.json().await?;
            Ok(wrapped.data)
        } else {
            Err(Self::error_for(status, response.json::<ErrorResponse>().await.ok()))
        }
    }

    fn error_for(status: StatusCode, body: Option<ErrorResponse>) -> CliError {
        let message = body
            .map(|e| e.error.message)
            .unwrap_or_else(|| format!("unexpected status {}", status));

        match status {
            StatusCode::UNAUTHORIZED => CliError::Unauthorized(message),
            _ => CliError::Api(message),
        }
    }

    /// Check server health
    pub async fn health_check(&self) -> Result<bool> {
        let url = endpoints::health_url(&self.base_url);

        match self.client.get(&url).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    /// Fetch the featured list
    pub async fn featured(&self) -> Result<Vec<Video>> {
        let url = endpoints::featured_url(&self.base_url);
        let response = self.client.get(&url).send().await?;
        Self::unwrap_response(response).await
    }

    /// Fetch the trending list
    pub async fn trending(&self) -> Result<Vec<Video>> {
        let url = endpoints::trending_url(&self.base_url);
        let response = self.client.get(&url).send().await?;
        Self::unwrap_response(response).await
    }

    /// List catalog records with optional filters
    pub async fn list_videos(
        &self,
        page: Option<i64>,
        limit: Option<i64>,
        category: Option<&str>,
        search: Option<&str>,
    ) -> Result<VideoListResponse> {
        let url = endpoints::videos_url(&self.base_url, page, limit, category, search);
        let response = self.client.get(&url).send().await?;
        Self::unwrap_response(response).await
    }

    /// Fetch one record by id
    ///
    /// The server counts this fetch as a view.
    pub async fn get_video(&self, id: i64) -> Result<Video> {
        let url = endpoints::video_url(&self.base_url, id);
        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CliError::VideoNotFound(id));
        }

        Self::unwrap_response(response).await
    }

    /// Fetch the category allow-list
    pub async fn categories(&self) -> Result<Vec<Category>> {
        let url = endpoints::categories_url(&self.base_url);
        let response = self.client.get(&url).send().await?;
        Self::unwrap_response(response).await
    }

    /// Register a new account
    pub async fn register(&self, email: &str, password: &str, name: &str) -> Result<AuthResponse> {
        let url = endpoints::register_url(&self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
                "name": name,
            }))
            .send()
            .await?;
        Self::unwrap_response(response).await
    }

    /// Log in with existing credentials
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let url = endpoints::login_url(&self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await?;
        Self::unwrap_response(response).await
    }

    /// Upload a video (requires a token)
    pub async fn upload(&self, submission: UploadSubmission) -> Result<Video> {
        let url = endpoints::upload_url(&self.base_url);

        let file_part = multipart::Part::bytes(submission.content)
            .file_name(submission.file_name)
            .mime_str(&submission.mimetype)?;

        let mut form = multipart::Form::new()
            .part("video", file_part)
            .text("title", submission.title)
            .text("category", submission.category);

        if let Some(description) = submission.description {
            form = form.text("description", description);
        }
        if let Some(tags) = submission.tags {
            form = form.text("tags", tags);
        }

        let response = self
            .authorize(self.client.post(&url))
            .multipart(form)
            .send()
            .await?;
        Self::unwrap_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn video_json(id: i64, title: &str) -> serde_json::Value {
        json!({
            "id": id,
            "title": title,
            "filename": format!("video-17-{}.mp4", id),
            "original_name": "clip.mp4",
            "mimetype": "video/mp4",
            "size": 1024,
            "category": "programming",
            "account_id": 1,
            "uploader_name": "Ada",
            "views": 3,
            "featured": false,
            "created_at": "2026-08-07T10:00:00"
        })
    }

    #[test]
    fn test_api_client_creation() {
        let client = ApiClient::new("http://localhost:5000".to_string()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[tokio::test]
    async fn test_health_check_unreachable() {
        let client = ApiClient::new("http://localhost:1".to_string()).unwrap();
        assert!(!client.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_featured_parses_contract() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/videos/featured"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": [video_json(1, "Intro to Rust")]
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let videos = client.featured().await.unwrap();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].title, "Intro to Rust");
        assert_eq!(videos[0].category, Category::Programming);
    }

    #[tokio::test]
    async fn test_list_videos_sends_filters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/videos"))
            .and(query_param("page", "2"))
            .and(query_param("limit", "5"))
            .and(query_param("search", "rust"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {
                    "videos": [],
                    "page": 2,
                    "limit": 5,
                    "total": 0
                }
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let response = client
            .list_videos(Some(2), Some(5), None, Some("rust"))
            .await
            .unwrap();
        assert_eq!(response.page, 2);
        assert_eq!(response.total, 0);
    }

    #[tokio::test]
    async fn test_get_video_maps_404() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/videos/42"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "success": false,
                "error": { "code": "NOT_FOUND", "message": "Video 42 not found" }
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let result = client.get_video(42).await;
        assert!(matches!(result, Err(CliError::VideoNotFound(42))));
    }

    #[tokio::test]
    async fn test_upload_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/videos/upload"))
            .and(header("authorization", "Bearer session-token"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "success": true,
                "data": video_json(9, "Uploaded")
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap().with_token("session-token");
        let video = client
            .upload(UploadSubmission {
                file_name: "clip.mp4".to_string(),
                mimetype: "video/mp4".to_string(),
                content: b"bytes".to_vec(),
                title: "Uploaded".to_string(),
                description: None,
                category: "programming".to_string(),
                tags: None,
            })
            .await
            .unwrap();
        assert_eq!(video.id, 9);
    }

    #[tokio::test]
    async fn test_error_body_message_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "success": false,
                "error": { "code": "UNAUTHORIZED", "message": "Invalid email or password" }
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).unwrap();
        let result = client.login("ada@example.com", "nope12").await;
        assert!(matches!(
            result,
            Err(CliError::Unauthorized(message)) if message.contains("Invalid email or password")
        ));
    }
}
