//! API contract types
//!
//! The request and response payloads exchanged between the OptiWave server
//! and its clients. Both sides use these structs at the boundary, so the
//! wire format is defined in exactly one place.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Maximum accepted upload size in bytes (100 MiB).
pub const MAX_VIDEO_BYTES: u64 = 100 * 1024 * 1024;

/// Content kinds accepted for uploaded binaries.
pub const ALLOWED_VIDEO_MIME_TYPES: [&str; 5] = [
    "video/mp4",
    "video/mpeg",
    "video/quicktime",
    "video/webm",
    "video/x-msvideo",
];

/// The closed set of video categories.
///
/// Declaration order is the order the categories endpoint reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Programming,
    Ai,
    MachineLearning,
    WebDevelopment,
    MobileDevelopment,
    DataScience,
    CodingTutorials,
    SoftwareEngineering,
    TechEducation,
}

impl Category {
    /// All categories, in declaration order.
    pub const ALL: [Category; 9] = [
        Category::Programming,
        Category::Ai,
        Category::MachineLearning,
        Category::WebDevelopment,
        Category::MobileDevelopment,
        Category::DataScience,
        Category::CodingTutorials,
        Category::SoftwareEngineering,
        Category::TechEducation,
    ];

    /// The wire representation of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Programming => "programming",
            Category::Ai => "ai",
            Category::MachineLearning => "machine-learning",
            Category::WebDevelopment => "web-development",
            Category::MobileDevelopment => "mobile-development",
            Category::DataScience => "data-science",
            Category::CodingTutorials => "coding-tutorials",
            Category::SoftwareEngineering => "software-engineering",
            Category::TechEducation => "tech-education",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a member of the category allow-list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategory(pub String);

/// One catalog record, as returned by every video endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Server-generated stored filename; the only public reference to the
    /// binary (served under `/uploads/<filename>`).
    pub filename: String,
    /// Client-supplied name, kept for display only.
    pub original_name: String,
    pub mimetype: String,
    pub size: i64,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    pub account_id: i64,
    /// Display name of the owning account, joined in by the server.
    pub uploader_name: String,
    pub views: i64,
    pub featured: bool,
    pub created_at: NaiveDateTime,
}

/// Paginated list response for `GET /api/videos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoListResponse {
    pub videos: Vec<Video>,
    pub page: i64,
    pub limit: i64,
    /// Total records matching the filter, across all pages.
    pub total: i64,
}

/// Public account details (never includes the credential).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountInfo {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

/// Response to a successful registration or login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Bearer token for subsequent authenticated requests.
    pub token: String,
    pub account: AccountInfo,
}

/// Standard success response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl<T> ApiResponse<T> {
    /// Create a new success response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
            meta: None,
        }
    }

    /// Create a success response with metadata
    pub fn success_with_meta(data: T, meta: serde_json::Value) -> Self {
        Self {
            success: true,
            data,
            meta: Some(meta),
        }
    }
}

/// Standard error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }

    /// Create an error response with details
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: Some(details),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_category_order_matches_declaration() {
        let names: Vec<_> = Category::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "programming",
                "ai",
                "machine-learning",
                "web-development",
                "mobile-development",
                "data-science",
                "coding-tutorials",
                "software-engineering",
                "tech-education",
            ]
        );
    }

    #[test]
    fn test_category_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_str(category.as_str()).unwrap(), category);
        }
    }

    #[test]
    fn test_category_rejects_unknown() {
        assert!(Category::from_str("cooking").is_err());
    }

    #[test]
    fn test_category_serde_uses_kebab_case() {
        let json = serde_json::to_string(&Category::MachineLearning).unwrap();
        assert_eq!(json, "\"machine-learning\"");

        let parsed: Category = serde_json::from_str("\"web-development\"").unwrap();
        assert_eq!(parsed, Category::WebDevelopment);
    }

    #[test]
    fn test_api_response_serialization() {
        let response = ApiResponse::success("test data".to_string());
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"success\":true"));
        assert!(json.contains("\"data\":\"test data\""));
        assert!(!json.contains("\"meta\""));
    }

    #[test]
    fn test_error_response_with_details() {
        let response = ErrorResponse::with_details(
            "VALIDATION_ERROR",
            "Invalid category",
            serde_json::json!({ "allowed_categories": ["programming"] }),
        );
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"success\":false"));
        assert!(json.contains("allowed_categories"));
    }
}
