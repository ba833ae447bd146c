//! Credential hashing utilities.

use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Hash a password with a fresh random salt.
///
/// The result is stored as `<salt>$<hex digest>`; the salt is regenerated on
/// every call, so hashing the same password twice yields different strings.
pub fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    format!("{}${}", salt, digest_hex(&salt, password))
}

/// Verify a plaintext password against a stored `salt$digest` hash.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt, digest)) = stored.split_once('$') else {
        return false;
    };
    digest_hex(salt, password) == digest
}

fn digest_hex(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("secret123");
        assert!(verify_password("secret123", &hash));
        assert!(!verify_password("wrong", &hash));
    }

    #[test]
    fn test_salts_differ_per_hash() {
        let first = hash_password("same-password");
        let second = hash_password("same-password");
        assert_ne!(first, second);
        assert!(verify_password("same-password", &first));
        assert!(verify_password("same-password", &second));
    }

    #[test]
    fn test_malformed_stored_hash_rejected() {
        assert!(!verify_password("anything", "not-a-valid-hash"));
    }
}
