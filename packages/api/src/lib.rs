//! # API crate: REST backend for the recipe app
//!
//! The wire types in [`models`] compile everywhere (the web client uses them too).
//! Everything that touches the database or the network is behind the `server`
//! feature, so WASM builds never pull in SQLx, Tokio networking or Argon2.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`models`] | none | `Credentials`, `TokenResponse`, `ErrorBody`, `ClientSettings`; the `recipes` row type under `server` |
//! | [`auth`] | `server` | Argon2 password hashing, bearer token issuing and checking |
//! | [`db`] | `server` | PostgreSQL pool (lazy `OnceCell` singleton) and [`db::PgStore`] |
//! | [`error`] | `server` | [`error::ApiError`] and its HTTP mapping |
//! | [`routes`] | `server` | The axum `/api` router over any store |
//! | [`settings`] | `server` | Layered configuration (`config` crate) |
//!
//! Migrations live in `migrations/` and are applied by the web binary at startup.

pub mod auth;
pub mod db;
pub mod models;

#[cfg(feature = "server")]
pub mod error;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod settings;

pub use models::{ClientSettings, Credentials, ErrorBody, TokenResponse};
pub use store::{NewRecipe, Recipe, RecipeId};
