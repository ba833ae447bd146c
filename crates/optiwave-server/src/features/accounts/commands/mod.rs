//! Write operations for accounts

pub mod login;
pub mod register;

pub use login::{LoginCommand, LoginError};
pub use register::{RegisterAccountCommand, RegisterAccountError};
