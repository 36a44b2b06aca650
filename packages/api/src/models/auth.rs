//! # Login and signup payloads
//!
//! [`Credentials`] is the JSON body of `POST /api/login` and `POST /api/signup`.
//! The password field is named `pwd` on the wire. A successful call answers with a
//! [`TokenResponse`]; every error answers with an [`ErrorBody`].

use serde::{Deserialize, Serialize};

/// Username and password submitted by the login form.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub pwd: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, pwd: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            pwd: pwd.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("pwd", &"***")
            .finish()
    }
}

/// Bearer token handed out on login or signup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// JSON error body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
