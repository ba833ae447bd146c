//! Bearer-token request extractor.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::auth::token::AccountClaims;
use crate::error::AppError;
use crate::features::FeatureState;

/// The authenticated account for the current request.
///
/// Decodes the `Authorization: Bearer <token>` header against the shared
/// [`super::TokenKeys`]; handlers that take this extractor reject
/// unauthenticated requests with 401 before running.
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub AccountClaims);

#[async_trait]
impl FromRequestParts<FeatureState> for CurrentAccount {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &FeatureState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Auth("Missing Authorization header".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Auth("Expected a Bearer token".to_string()))?;

        let claims = state
            .tokens
            .decode(token)
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected bearer token");
                AppError::Auth("Invalid or expired token".to_string())
            })?;

        Ok(CurrentAccount(claims))
    }
}
