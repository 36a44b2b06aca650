//! Wire types shared by the REST server and its clients.

mod auth;
mod client;
#[cfg(feature = "server")]
mod recipe;

pub use auth::{Credentials, ErrorBody, TokenResponse};
pub use client::ClientSettings;
#[cfg(feature = "server")]
pub use recipe::RecipeRow;
