use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use optiwave_common::{ApiResponse, ErrorResponse};

use super::commands::{
    LoginCommand, LoginError, RegisterAccountCommand, RegisterAccountError,
};
use crate::features::FeatureState;

pub fn accounts_routes() -> Router<FeatureState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

#[tracing::instrument(skip(state, command), fields(email = %command.email))]
async fn register(
    State(state): State<FeatureState>,
    Json(command): Json<RegisterAccountCommand>,
) -> Result<Response, AccountApiError> {
    let response =
        super::commands::register::handle(state.db, state.tokens.clone(), command).await?;

    tracing::info!(account_id = response.account.id, "Account registered via API");

    Ok((StatusCode::CREATED, Json(ApiResponse::success(response))).into_response())
}

#[tracing::instrument(skip(state, command), fields(email = %command.email))]
async fn login(
    State(state): State<FeatureState>,
    Json(command): Json<LoginCommand>,
) -> Result<Response, AccountApiError> {
    let response = super::commands::login::handle(state.db, state.tokens.clone(), command).await?;

    tracing::debug!(account_id = response.account.id, "Account logged in via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

#[derive(Debug)]
enum AccountApiError {
    RegisterError(RegisterAccountError),
    LoginError(LoginError),
}

impl From<RegisterAccountError> for AccountApiError {
    fn from(err: RegisterAccountError) -> Self {
        Self::RegisterError(err)
    }
}

impl From<LoginError> for AccountApiError {
    fn from(err: LoginError) -> Self {
        Self::LoginError(err)
    }
}

impl IntoResponse for AccountApiError {
    fn into_response(self) -> Response {
        match self {
            AccountApiError::RegisterError(RegisterAccountError::Text(_))
            | AccountApiError::RegisterError(RegisterAccountError::PasswordTooShort) => {
                let error = ErrorResponse::new("VALIDATION_ERROR", self.to_string());
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            },
            AccountApiError::RegisterError(RegisterAccountError::EmailTaken(_)) => {
                let error = ErrorResponse::new("CONFLICT", self.to_string());
                (StatusCode::CONFLICT, Json(error)).into_response()
            },
            AccountApiError::RegisterError(RegisterAccountError::Token(_)) => {
                tracing::error!("Token error during registration: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },
            AccountApiError::RegisterError(RegisterAccountError::Database(_)) => {
                tracing::error!("Database error during registration: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },

            AccountApiError::LoginError(LoginError::CredentialsRequired) => {
                let error = ErrorResponse::new("VALIDATION_ERROR", self.to_string());
                (StatusCode::BAD_REQUEST, Json(error)).into_response()
            },
            AccountApiError::LoginError(LoginError::InvalidCredentials) => {
                let error = ErrorResponse::new("UNAUTHORIZED", self.to_string());
                (StatusCode::UNAUTHORIZED, Json(error)).into_response()
            },
            AccountApiError::LoginError(LoginError::Token(_)) => {
                tracing::error!("Token error during login: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },
            AccountApiError::LoginError(LoginError::Database(_)) => {
                tracing::error!("Database error during login: {}", self);
                let error = ErrorResponse::new("INTERNAL_ERROR", "A database error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
            },
        }
    }
}

impl std::fmt::Display for AccountApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RegisterError(e) => write!(f, "{}", e),
            Self::LoginError(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AccountApiError::LoginError(LoginError::InvalidCredentials);
        assert!(err.to_string().contains("Invalid email or password"));
    }

    #[test]
    fn test_invalid_credentials_map_to_401() {
        let response =
            AccountApiError::LoginError(LoginError::InvalidCredentials).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_email_taken_maps_to_409() {
        let response = AccountApiError::RegisterError(RegisterAccountError::EmailTaken(
            "ada@example.com".to_string(),
        ))
        .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_routes_structure() {
        let router = accounts_routes();
        assert!(format!("{:?}", router).contains("Router"));
    }
}
