//! Local account authentication: password hashing and bearer tokens.

#[cfg(feature = "server")]
mod password;
#[cfg(feature = "server")]
mod token;

#[cfg(feature = "server")]
pub use password::{hash_password, verify_password, PasswordError, MIN_PASSWORD_LEN};
#[cfg(feature = "server")]
pub use token::{authenticate, bearer_token, issue_token};
