//! Recipe endpoints: thin adapters from HTTP to [`store::Recipes`].

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use store::{NewRecipe, Recipe};

use super::{AppState, Backend};
use crate::auth::authenticate;
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Default, Deserialize)]
pub struct TrendingParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// `GET /api/recipes?page=&size=`
pub async fn trending<S: Backend>(
    State(state): State<AppState<S>>,
    Query(params): Query<TrendingParams>,
) -> ApiResult<Json<Vec<Recipe>>> {
    let page = params.page.unwrap_or(1);
    let size = params.size.unwrap_or(state.settings.server.page_size);
    Ok(Json(state.recipes.get_trending(page, size).await?))
}

/// `POST /api/recipes`: the author is always the token's user.
pub async fn create<S: Backend>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    Json(mut recipe): Json<NewRecipe>,
) -> ApiResult<(StatusCode, Json<Recipe>)> {
    recipe.userid = authenticate(&state.store, &headers).await?;
    let created = state.recipes.create(recipe).await?;
    tracing::info!("Created recipe {} for {}", created.id, created.userid);
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/recipes/{id}`
pub async fn by_id<S: Backend>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Recipe>> {
    state
        .recipes
        .get_recipe_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("recipe {id} not found")))
}

/// `GET /api/recipes/tag/{tag}`
pub async fn by_tag<S: Backend>(
    State(state): State<AppState<S>>,
    Path(tag): Path<String>,
) -> ApiResult<Json<Vec<Recipe>>> {
    Ok(Json(state.recipes.get_recipes_by_tag(&tag).await?))
}

/// `GET /api/recipes/user/{userid}`
pub async fn by_user<S: Backend>(
    State(state): State<AppState<S>>,
    Path(userid): Path<String>,
) -> ApiResult<Json<Vec<Recipe>>> {
    Ok(Json(state.recipes.get_recipes_by_user_id(&userid).await?))
}

/// `GET /api/recipes/search?q=`
pub async fn search<S: Backend>(
    State(state): State<AppState<S>>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<Vec<Recipe>>> {
    Ok(Json(state.recipes.get_recipes_from_search(&params.q).await?))
}
