//! Authentication primitives
//!
//! Accounts authenticate with a salted credential hash and receive a signed
//! bearer token; protected routes check the token through the
//! [`extract::CurrentAccount`] extractor. Token mechanics are deliberately
//! generic: encode claims, decode claims, nothing else (no refresh, no
//! revocation).

pub mod extract;
pub mod password;
pub mod token;

pub use extract::CurrentAccount;
pub use token::{AccountClaims, TokenKeys};
