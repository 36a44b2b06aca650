//! # Recipe query layer over an abstract store
//!
//! [`Recipes`] turns application requests (trending list, create, lookups by id,
//! tag or author, free-text search) into calls on a [`RecipeStore`]. It holds no
//! state between calls; the store owns everything persisted.
//!
//! ## [`RecipeStore`] / [`AccountStore`] traits
//!
//! Async interfaces implemented by [`crate::MemoryStore`] here and by the Postgres
//! store in the `api` crate. Futures are `Send` so server handlers can hold them
//! across `.await` points.
//!
//! ## Failure semantics
//!
//! Every [`Recipes`] operation logs a failure with `tracing::error!` and hands the
//! same [`StoreError`] back to the caller. Nothing is retried or recovered here;
//! the HTTP layer decides which status code a failure becomes.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::models::{Account, AuthToken, NewRecipe, Recipe, RecipeId};
use crate::query::{Page, RecipeFilter, SearchTerm};

/// Async storage for recipes.
pub trait RecipeStore {
    /// Persist a new recipe and return it with its assigned id.
    fn insert(
        &self,
        recipe: NewRecipe,
    ) -> impl Future<Output = Result<Recipe, StoreError>> + Send;

    fn find_by_id(
        &self,
        id: &RecipeId,
    ) -> impl Future<Output = Result<Option<Recipe>, StoreError>> + Send;

    /// Recipes selected by `filter`, newest first then most liked, optionally
    /// restricted to one page.
    fn find(
        &self,
        filter: &RecipeFilter,
        page: Option<Page>,
    ) -> impl Future<Output = Result<Vec<Recipe>, StoreError>> + Send;
}

/// Async storage for accounts and their bearer tokens.
pub trait AccountStore {
    /// Fails with [`StoreError::Conflict`] when the username is taken.
    fn create_account(
        &self,
        username: &str,
        password_hash: &str,
    ) -> impl Future<Output = Result<Account, StoreError>> + Send;

    fn find_account(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<Account>, StoreError>> + Send;

    fn insert_token(
        &self,
        token: &AuthToken,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn find_token(
        &self,
        token: &str,
    ) -> impl Future<Output = Result<Option<AuthToken>, StoreError>> + Send;

    fn revoke_token(&self, token: &str) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Delete every token that expired at or before `now`; returns how many.
    fn purge_expired_tokens(
        &self,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<u64, StoreError>> + Send;
}

/// Recipe operations backed by a [`RecipeStore`].
#[derive(Clone, Debug)]
pub struct Recipes<S: RecipeStore> {
    store: S,
}

impl<S: RecipeStore> Recipes<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Newest-then-most-liked recipes, `page_size` at a time.
    pub async fn get_trending(
        &self,
        page_number: i64,
        page_size: i64,
    ) -> Result<Vec<Recipe>, StoreError> {
        let result = match Page::new(page_number, page_size) {
            Ok(page) => self.store.find(&RecipeFilter::All, Some(page)).await,
            Err(e) => Err(e),
        };
        result.inspect_err(|e| tracing::error!("Error fetching trending recipes: {}", e))
    }

    pub async fn create(&self, recipe_data: NewRecipe) -> Result<Recipe, StoreError> {
        self.store
            .insert(recipe_data)
            .await
            .inspect_err(|e| tracing::error!("Error creating recipe: {}", e))
    }

    /// `Ok(None)` when no recipe has this id; `Err` when `id` is malformed.
    pub async fn get_recipe_by_id(&self, id: &str) -> Result<Option<Recipe>, StoreError> {
        let result = match RecipeId::parse(id) {
            Ok(id) => self.store.find_by_id(&id).await,
            Err(e) => Err(e),
        };
        result.inspect_err(|e| tracing::error!("Error fetching recipe by id: {}", e))
    }

    pub async fn get_recipes_by_tag(&self, tag: &str) -> Result<Vec<Recipe>, StoreError> {
        self.store
            .find(&RecipeFilter::Tag(tag.to_string()), None)
            .await
            .inspect_err(|e| tracing::error!("Error fetching recipes by tag: {}", e))
    }

    pub async fn get_recipes_by_user_id(&self, userid: &str) -> Result<Vec<Recipe>, StoreError> {
        self.store
            .find(&RecipeFilter::User(userid.to_string()), None)
            .await
            .inspect_err(|e| tracing::error!("Error fetching recipes by user id: {}", e))
    }

    /// Case-insensitive literal match on name, tags or userid.
    pub async fn get_recipes_from_search(&self, input: &str) -> Result<Vec<Recipe>, StoreError> {
        self.store
            .find(&RecipeFilter::Search(SearchTerm::new(input)), None)
            .await
            .inspect_err(|e| tracing::error!("Error fetching recipes by search: {}", e))
    }
}
