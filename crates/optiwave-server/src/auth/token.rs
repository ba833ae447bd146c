//! Bearer token encode/decode.

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sessions stay valid for a week.
const TOKEN_TTL_DAYS: i64 = 7;

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountClaims {
    /// Account id.
    pub sub: i64,
    /// Display name, for logging and response rendering.
    pub name: String,
    /// Expiry as a unix timestamp.
    pub exp: i64,
}

/// Errors from token handling.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("Invalid or expired token")]
    Decode(#[source] jsonwebtoken::errors::Error),
}

/// Signing and verification keys, shared through router state.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenKeys {
    /// Build keys from the configured secret.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Issue a token for the given account, expiring in a week.
    pub fn issue(&self, account_id: i64, name: &str) -> Result<String, TokenError> {
        let claims = AccountClaims {
            sub: account_id,
            name: name.to_string(),
            exp: (Utc::now() + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding).map_err(TokenError::Encode)
    }

    /// Decode and validate a token, returning its claims.
    pub fn decode(&self, token: &str) -> Result<AccountClaims, TokenError> {
        jsonwebtoken::decode::<AccountClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenError::Decode)
    }
}

impl std::fmt::Debug for TokenKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenKeys").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_decode_round_trip() {
        let keys = TokenKeys::new("test-secret");
        let token = keys.issue(42, "Ada").unwrap();

        let claims = keys.decode(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.name, "Ada");
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_decode_rejects_wrong_secret() {
        let token = TokenKeys::new("secret-a").issue(1, "Ada").unwrap();
        assert!(TokenKeys::new("secret-b").decode(&token).is_err());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let keys = TokenKeys::new("test-secret");
        assert!(keys.decode("not.a.token").is_err());
    }
}
