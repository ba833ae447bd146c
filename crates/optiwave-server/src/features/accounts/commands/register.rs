//! Registration command

use chrono::NaiveDateTime;
use optiwave_common::{AccountInfo, AuthResponse};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::auth::password::hash_password;
use crate::auth::token::{TokenError, TokenKeys};
use crate::features::shared::validation::{
    validate_email, validate_required_text, TextValidationError,
};

/// Accounts need at least this many password characters.
const MIN_PASSWORD_LEN: usize = 6;

/// A registration submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterAccountCommand {
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub name: String,
}

/// Errors that can occur during registration
#[derive(Debug, thiserror::Error)]
pub enum RegisterAccountError {
    #[error(transparent)]
    Text(#[from] TextValidationError),
    #[error("Password must be at least {min} characters", min = MIN_PASSWORD_LEN)]
    PasswordTooShort,
    #[error("An account with email '{0}' already exists")]
    EmailTaken(String),
    #[error("Token error: {0}")]
    Token(#[from] TokenError),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RegisterAccountCommand {
    /// Validate the submission
    pub fn validate(&self) -> Result<(), RegisterAccountError> {
        validate_email(&self.email)?;
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(RegisterAccountError::PasswordTooShort);
        }
        validate_required_text(&self.name, "Name", 100)?;
        Ok(())
    }
}

/// Handles registration
///
/// Creates the account and immediately issues a session token.
#[tracing::instrument(skip(pool, tokens, command), fields(email = %command.email))]
pub async fn handle(
    pool: SqlitePool,
    tokens: TokenKeys,
    command: RegisterAccountCommand,
) -> Result<AuthResponse, RegisterAccountError> {
    command.validate()?;

    let password_hash = hash_password(&command.password);

    let inserted: Result<(i64, NaiveDateTime), sqlx::Error> = sqlx::query_as(
        "INSERT INTO accounts (email, password_hash, name) VALUES (?1, ?2, ?3) \
         RETURNING id, created_at",
    )
    .bind(&command.email)
    .bind(&password_hash)
    .bind(&command.name)
    .fetch_one(&pool)
    .await;

    let (id, created_at) = match inserted {
        Ok(row) => row,
        Err(e) => {
            let unique_violation = e
                .as_database_error()
                .map(|db| db.is_unique_violation())
                .unwrap_or(false);
            if unique_violation {
                return Err(RegisterAccountError::EmailTaken(command.email));
            }
            return Err(e.into());
        },
    };

    let token = tokens.issue(id, &command.name)?;

    tracing::info!(account_id = id, "Account registered");

    Ok(AuthResponse {
        token,
        account: AccountInfo {
            id,
            email: command.email,
            name: command.name,
            created_at,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> RegisterAccountCommand {
        RegisterAccountCommand {
            email: "ada@example.com".to_string(),
            password: "s3cret-pass".to_string(),
            name: "Ada".to_string(),
        }
    }

    #[test]
    fn test_validation_rejects_bad_email() {
        let mut cmd = command();
        cmd.email = "not-an-email".to_string();
        assert!(matches!(cmd.validate(), Err(RegisterAccountError::Text(_))));
    }

    #[test]
    fn test_validation_rejects_short_password() {
        let mut cmd = command();
        cmd.password = "abc".to_string();
        assert!(matches!(
            cmd.validate(),
            Err(RegisterAccountError::PasswordTooShort)
        ));
    }

    #[sqlx::test]
    async fn test_register_returns_account_and_token(pool: SqlitePool) {
        let tokens = TokenKeys::new("test-secret");

        let response = handle(pool, tokens.clone(), command()).await.unwrap();

        assert!(response.account.id > 0);
        assert_eq!(response.account.email, "ada@example.com");
        let claims = tokens.decode(&response.token).unwrap();
        assert_eq!(claims.sub, response.account.id);
    }

    #[sqlx::test]
    async fn test_register_never_stores_plaintext(pool: SqlitePool) {
        let tokens = TokenKeys::new("test-secret");
        let response = handle(pool.clone(), tokens, command()).await.unwrap();

        let stored: String = sqlx::query_scalar("SELECT password_hash FROM accounts WHERE id = ?1")
            .bind(response.account.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert!(!stored.contains("s3cret-pass"));
    }

    #[sqlx::test]
    async fn test_duplicate_email_is_rejected(pool: SqlitePool) {
        let tokens = TokenKeys::new("test-secret");
        handle(pool.clone(), tokens.clone(), command()).await.unwrap();

        let result = handle(pool, tokens, command()).await;
        assert!(matches!(
            result,
            Err(RegisterAccountError::EmailTaken(email)) if email == "ada@example.com"
        ));
    }
}
