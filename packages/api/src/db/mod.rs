//! # Database module: PostgreSQL pool and the Postgres-backed store
//!
//! Entirely gated behind `#[cfg(feature = "server")]` so client (WASM) builds never
//! pull in SQLx or Tokio networking code.
//!
//! - [`get_pool`]: a lazy, process-wide [`sqlx::PgPool`] singleton backed by a
//!   [`tokio::sync::OnceCell`], opened from [`crate::settings::DatabaseSettings`] on
//!   first use.
//! - [`PgStore`]: implements [`store::RecipeStore`] and [`store::AccountStore`] on
//!   top of the `recipes`, `users` and `auth_tokens` tables (see `migrations/`).

#[cfg(feature = "server")]
mod pg_store;
#[cfg(feature = "server")]
mod pool;

#[cfg(feature = "server")]
pub use pg_store::PgStore;
#[cfg(feature = "server")]
pub use pool::get_pool;
