//! Login command

use chrono::NaiveDateTime;
use optiwave_common::{AccountInfo, AuthResponse};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

use crate::auth::password::verify_password;
use crate::auth::token::{TokenError, TokenKeys};

/// A login submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCommand {
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

/// Errors that can occur during login
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    #[error("Email and password are required")]
    CredentialsRequired,
    /// Covers both unknown email and wrong password; callers cannot probe
    /// which one failed.
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Token error: {0}")]
    Token(#[from] TokenError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, FromRow)]
struct AccountRow {
    id: i64,
    email: String,
    password_hash: String,
    name: String,
    created_at: NaiveDateTime,
}

impl LoginCommand {
    /// Validate the submission
    pub fn validate(&self) -> Result<(), LoginError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(LoginError::CredentialsRequired);
        }
        Ok(())
    }
}

/// Handles login
#[tracing::instrument(skip(pool, tokens, command), fields(email = %command.email))]
pub async fn handle(
    pool: SqlitePool,
    tokens: TokenKeys,
    command: LoginCommand,
) -> Result<AuthResponse, LoginError> {
    command.validate()?;

    let row: Option<AccountRow> = sqlx::query_as(
        "SELECT id, email, password_hash, name, created_at FROM accounts WHERE email = ?1",
    )
    .bind(&command.email)
    .fetch_optional(&pool)
    .await?;

    let account = row.ok_or(LoginError::InvalidCredentials)?;

    if !verify_password(&command.password, &account.password_hash) {
        return Err(LoginError::InvalidCredentials);
    }

    let token = tokens.issue(account.id, &account.name)?;

    tracing::info!(account_id = account.id, "Account logged in");

    Ok(AuthResponse {
        token,
        account: AccountInfo {
            id: account.id,
            email: account.email,
            name: account.name,
            created_at: account.created_at,
        },
    })
}
