use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use optiwave_common::{ApiResponse, Category, ErrorResponse, MAX_VIDEO_BYTES};
use serde::Deserialize;
use serde_json::json;

use super::{
    commands::{UploadVideoCommand, UploadVideoError},
    queries::{
        FeaturedVideosError, GetVideoError, GetVideoQuery, ListVideosError, ListVideosQuery,
        TrendingVideosError,
    },
};
use crate::auth::CurrentAccount;
use crate::features::shared::pagination::PaginationParams;
use crate::features::FeatureState;

/// Headroom over the payload cap so the size check inside the upload command
/// is what rejects oversized files, not the transport.
const UPLOAD_BODY_LIMIT: usize = MAX_VIDEO_BYTES as usize + 16 * 1024 * 1024;

pub fn videos_routes() -> Router<FeatureState> {
    Router::new()
        .route("/", get(list_videos))
        .route("/upload", post(upload_video))
        .route("/featured", get(featured_videos))
        .route("/trending", get(trending_videos))
        .route("/categories/list", get(list_categories))
        .route("/:id", get(get_video))
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
}

/// Flat query-string parameters for the list endpoint.
#[derive(Debug, Deserialize)]
struct ListParams {
    page: Option<i64>,
    limit: Option<i64>,
    category: Option<Category>,
    search: Option<String>,
}

#[tracing::instrument(skip(state, params), fields(page = ?params.page, category = ?params.category))]
async fn list_videos(
    State(state): State<FeatureState>,
    Query(params): Query<ListParams>,
) -> Result<Response, VideoApiError> {
    let query = ListVideosQuery {
        pagination: PaginationParams::new(params.page, params.limit),
        category: params.category,
        search: params.search,
    };

    let response = super::queries::list::handle(state.db, query).await?;

    tracing::debug!(
        count = response.videos.len(),
        total = response.total,
        "Videos listed via API"
    );

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

#[tracing::instrument(skip(state))]
async fn featured_videos(State(state): State<FeatureState>) -> Result<Response, VideoApiError> {
    let videos = super::queries::featured::handle(state.db).await?;

    tracing::debug!(count = videos.len(), "Featured videos listed via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(videos))).into_response())
}

#[tracing::instrument(skip(state))]
async fn trending_videos(State(state): State<FeatureState>) -> Result<Response, VideoApiError> {
    let videos = super::queries::trending::handle(state.db).await?;

    tracing::debug!(count = videos.len(), "Trending videos listed via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(videos))).into_response())
}

#[tracing::instrument(skip(state), fields(video_id = id))]
async fn get_video(
    State(state): State<FeatureState>,
    Path(id): Path<i64>,
) -> Result<Response, VideoApiError> {
    let video = super::queries::get::handle(state.db, GetVideoQuery { id }).await?;

    tracing::debug!(views = video.views, "Video retrieved via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(video))).into_response())
}

async fn list_categories() -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse::success(Category::ALL.to_vec())),
    )
        .into_response()
}

#[tracing::instrument(skip(state, multipart), fields(account_id = account.0.sub))]
async fn upload_video(
    State(state): State<FeatureState>,
    account: CurrentAccount,
    mut multipart: Multipart,
) -> Result<Response, VideoApiError> {
    let mut command = UploadVideoCommand {
        account_id: account.0.sub,
        uploader_name: account.0.name.clone(),
        title: String::new(),
        description: None,
        category: None,
        tags: None,
        original_name: "video".to_string(),
        mimetype: None,
        content: Vec::new(),
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadVideoError::Multipart(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "video" => {
                if let Some(file_name) = field.file_name() {
                    command.original_name = file_name.to_string();
                }
                command.mimetype = field.content_type().map(|s| s.to_string());
                command.content = field
                    .bytes()
                    .await
                    .map_err(|e| UploadVideoError::Multipart(e.to_string()))?
                    .to_vec();
            },
            "title" => {
                command.title = field
                    .text()
                    .await
                    .map_err(|e| UploadVideoError::Multipart(e.to_string()))?;
            },
            "description" => {
                command.description = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| UploadVideoError::Multipart(e.to_string()))?,
                );
            },
            "category" => {
                command.category = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| UploadVideoError::Multipart(e.to_string()))?,
                );
            },
            "tags" => {
                command.tags = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| UploadVideoError::Multipart(e.to_string()))?,
                );
            },
            _ => {},
        }
    }

    let video = super::commands::upload::handle(state.db, state.media, command).await?;

    tracing::info!(
        video_id = video.id,
        filename = %video.filename,
        "Video uploaded via API"
    );

    Ok((StatusCode::CREATED, Json(ApiResponse::success(video))).into_response())
}

#[derive(Debug)]
#[allow(clippy::enum_variant_names)]
enum VideoApiError {
    UploadError(UploadVideoError),
    ListError(ListVideosError),
    FeaturedError(FeaturedVideosError),
    TrendingError(TrendingVideosError),
    GetError(GetVideoError),
}

impl From<UploadVideoError> for VideoApiError {
    fn from(err: UploadVideoError) -> Self {
        Self::UploadError(err)
    }
}

impl From<ListVideosError> for VideoApiError {
    fn from(err: ListVideosError) -> Self {
        Self::ListError(err)
    }
}

impl From<FeaturedVideosError> for VideoApiError {
    fn from(err: FeaturedVideosError) -> Self {
        Self::FeaturedError(err)
    }
}

impl From<TrendingVideosError> for VideoApiError {
    fn from(err: TrendingVideosError) -> Self {
        Self::TrendingError(err)
    }
}

impl From<GetVideoError> for VideoApiError {
    fn from(err: GetVideoError) -> Self {
        Self::GetError(err)
    }
}

impl IntoResponse for VideoApiError {
    fn into_response(self) -> Response {
        match self {
            VideoApiError::UploadError(UploadVideoError::Text(_))
            | VideoApiError::UploadError(UploadVideoError::CategoryRequired)
            | VideoApiError::UploadError(UploadVideoError::FileRequired)
            | VideoApiError::UploadError(UploadVideoError::Multipart(_)) => {
                let error = ErrorResponse::new("VALIDATION_ERROR", self.to_string());
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            },
            VideoApiError::UploadError(UploadVideoError::InvalidCategory(_)) => {
                let allowed: Vec<_> = Category::ALL.iter().map(|c| c.as_str()).collect();
                let error = ErrorResponse::with_details(
                    "VALIDATION_ERROR",
                    self.to_string(),
                    json!({ "allowed_categories": allowed }),
                );
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            },
            VideoApiError::UploadError(UploadVideoError::UnsupportedMedia(_)) => {
                let error = ErrorResponse::new("UNSUPPORTED_MEDIA", self.to_string());
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, Json(error)).into_response()
            },
            VideoApiError::UploadError(UploadVideoError::PayloadTooLarge(_)) => {
                let error = ErrorResponse::new("PAYLOAD_TOO_LARGE", self.to_string());
                (StatusCode::PAYLOAD_TOO_LARGE, Json(error)).into_response()
            },
            VideoApiError::UploadError(UploadVideoError::Storage(_)) => {
                tracing::error!("Storage error during upload: {}", self);
                let error = ErrorResponse::new("STORAGE_ERROR", "A storage error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },
            VideoApiError::UploadError(UploadVideoError::Database(_)) => {
                tracing::error!("Database error during upload: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },

            VideoApiError::ListError(ListVideosError::InvalidPage)
            | VideoApiError::ListError(ListVideosError::InvalidLimit) => {
                let error = ErrorResponse::new("VALIDATION_ERROR", self.to_string());
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            },
            VideoApiError::ListError(ListVideosError::Database(_)) => {
                tracing::error!("Database error during video listing: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },

            VideoApiError::FeaturedError(FeaturedVideosError::Database(_)) => {
                tracing::error!("Database error during featured listing: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },

            VideoApiError::TrendingError(TrendingVideosError::Database(_)) => {
                tracing::error!("Database error during trending listing: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },

            VideoApiError::GetError(GetVideoError::NotFound(_)) => {
                let error = ErrorResponse::new("NOT_FOUND", self.to_string());
                (StatusCode::NOT_FOUND, Json(error)).into_response()
            },
            VideoApiError::GetError(GetVideoError::Database(_)) => {
                tracing::error!("Database error during video retrieval: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },
        }
    }
}

impl std::fmt::Display for VideoApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UploadError(e) => write!(f, "{}", e),
            Self::ListError(e) => write!(f, "{}", e),
            Self::FeaturedError(e) => write!(f, "{}", e),
            Self::TrendingError(e) => write!(f, "{}", e),
            Self::GetError(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VideoApiError::UploadError(UploadVideoError::CategoryRequired);
        assert!(err.to_string().contains("Category is required"));
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = VideoApiError::GetError(GetVideoError::NotFound(9)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unsupported_media_maps_to_415() {
        let response =
            VideoApiError::UploadError(UploadVideoError::UnsupportedMedia("text/plain".into()))
                .into_response();
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[test]
    fn test_routes_structure() {
        let router = videos_routes();
        assert!(format!("{:?}", router).contains("Router"));
    }
}
