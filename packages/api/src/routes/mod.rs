//! # REST router
//!
//! Everything lives under `/api`:
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | GET | `/recipes?page=&size=` | [`recipes::trending`] |
//! | POST | `/recipes` | [`recipes::create`] (bearer token) |
//! | GET | `/recipes/{id}` | [`recipes::by_id`] |
//! | GET | `/recipes/tag/{tag}` | [`recipes::by_tag`] |
//! | GET | `/recipes/user/{userid}` | [`recipes::by_user`] |
//! | GET | `/recipes/search?q=` | [`recipes::search`] |
//! | POST | `auth.login_path` (default `/login`) | [`auth::login`] |
//! | POST | `/signup` | [`auth::signup`] |
//! | POST | `/logout` | [`auth::logout`] |
//! | GET | `/settings` | login path and page size for the web client |
//!
//! The router is generic over the store so the same handlers run against
//! [`crate::db::PgStore`] in production and [`store::MemoryStore`] in tests.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use store::{AccountStore, RecipeStore, Recipes};

use crate::models::ClientSettings;
use crate::settings::Settings;

pub mod auth;
pub mod recipes;

/// A store usable behind the router.
pub trait Backend: RecipeStore + AccountStore + Clone + Send + Sync + 'static {}

impl<T> Backend for T where T: RecipeStore + AccountStore + Clone + Send + Sync + 'static {}

/// Shared handler state.
#[derive(Clone, Debug)]
pub struct AppState<S: RecipeStore> {
    pub store: S,
    pub recipes: Recipes<S>,
    pub settings: Arc<Settings>,
}

impl<S: Backend> AppState<S> {
    pub fn new(store: S, settings: Settings) -> Self {
        Self {
            recipes: Recipes::new(store.clone()),
            store,
            settings: Arc::new(settings),
        }
    }
}

/// `GET /api/settings`
async fn client_settings<S: Backend>(State(state): State<AppState<S>>) -> Json<ClientSettings> {
    Json(state.settings.client_settings())
}

/// Build the `/api` router. `settings` should have passed
/// [`Settings::validate`]; a login path equal to another route panics here.
pub fn router<S: Backend>(state: AppState<S>) -> Router {
    let login_path = state.settings.auth.login_route();

    let api = Router::new()
        .route("/recipes", get(recipes::trending::<S>).post(recipes::create::<S>))
        .route("/recipes/search", get(recipes::search::<S>))
        .route("/recipes/tag/{tag}", get(recipes::by_tag::<S>))
        .route("/recipes/user/{userid}", get(recipes::by_user::<S>))
        .route("/recipes/{id}", get(recipes::by_id::<S>))
        .route(&login_path, post(auth::login::<S>))
        .route("/signup", post(auth::signup::<S>))
        .route("/logout", post(auth::logout::<S>))
        .route("/settings", get(client_settings::<S>));

    Router::new().nest("/api", api).with_state(state)
}
