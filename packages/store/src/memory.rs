use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::models::{Account, AuthToken, NewRecipe, Recipe, RecipeId};
use crate::query::{trending_order, Page, RecipeFilter};
use crate::repo::{AccountStore, RecipeStore};

/// In-memory store for testing and local development.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    recipes: Arc<Mutex<Vec<Recipe>>>,
    accounts: Arc<Mutex<HashMap<String, Account>>>,
    tokens: Arc<Mutex<HashMap<String, AuthToken>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StoreError> {
    mutex
        .lock()
        .map_err(|_| StoreError::Backend("memory store lock poisoned".to_string()))
}

impl RecipeStore for MemoryStore {
    async fn insert(&self, recipe: NewRecipe) -> Result<Recipe, StoreError> {
        let recipe = Recipe::from_new(RecipeId::new(), recipe);
        lock(&self.recipes)?.push(recipe.clone());
        Ok(recipe)
    }

    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, StoreError> {
        Ok(lock(&self.recipes)?.iter().find(|r| r.id == *id).cloned())
    }

    async fn find(
        &self,
        filter: &RecipeFilter,
        page: Option<Page>,
    ) -> Result<Vec<Recipe>, StoreError> {
        let mut found: Vec<Recipe> = lock(&self.recipes)?
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        found.sort_by(trending_order);
        Ok(match page {
            Some(page) => page.apply(found),
            None => found,
        })
    }
}

impl AccountStore for MemoryStore {
    async fn create_account(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<Account, StoreError> {
        let mut accounts = lock(&self.accounts)?;
        if accounts.contains_key(username) {
            return Err(StoreError::Conflict(username.to_string()));
        }
        let account = Account {
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        accounts.insert(username.to_string(), account.clone());
        Ok(account)
    }

    async fn find_account(&self, username: &str) -> Result<Option<Account>, StoreError> {
        Ok(lock(&self.accounts)?.get(username).cloned())
    }

    async fn insert_token(&self, token: &AuthToken) -> Result<(), StoreError> {
        lock(&self.tokens)?.insert(token.token.clone(), token.clone());
        Ok(())
    }

    async fn find_token(&self, token: &str) -> Result<Option<AuthToken>, StoreError> {
        Ok(lock(&self.tokens)?.get(token).cloned())
    }

    async fn revoke_token(&self, token: &str) -> Result<(), StoreError> {
        lock(&self.tokens)?.remove(token);
        Ok(())
    }

    async fn purge_expired_tokens(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        let mut tokens = lock(&self.tokens)?;
        let before = tokens.len();
        tokens.retain(|_, t| !t.is_expired(now));
        Ok((before - tokens.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::Recipes;
    use chrono::{Duration, TimeZone};

    fn day(n: i64) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(n)
    }

    async fn seeded() -> Recipes<MemoryStore> {
        let recipes = Recipes::new(MemoryStore::new());
        let seed = [
            NewRecipe::new("Chocolate Cake", "baker")
                .with_tags(["dessert", "baking"])
                .with_likes(10)
                .with_date(day(3)),
            NewRecipe::new("Lentil Soup", "greens")
                .with_tags(["vegan", "soup"])
                .with_likes(4)
                .with_date(day(3)),
            NewRecipe::new("Tofu Stir Fry", "greens")
                .with_tags(["vegan-friendly", "dinner"])
                .with_likes(8)
                .with_date(day(1)),
            NewRecipe::new("Crepes", "cakeman")
                .with_tags(["breakfast"])
                .with_likes(2)
                .with_date(day(2)),
            NewRecipe::new("Carrot Salad", "greens")
                .with_tags(["Vegan", "Cupcake-adjacent"])
                .with_likes(1)
                .with_date(day(0)),
        ];
        for recipe in seed {
            recipes.create(recipe).await.unwrap();
        }
        recipes
    }

    fn names(recipes: &[Recipe]) -> Vec<&str> {
        recipes.iter().map(|r| r.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_trending_order_and_pages() {
        let recipes = seeded().await;

        let first = recipes.get_trending(1, 2).await.unwrap();
        assert_eq!(names(&first), vec!["Chocolate Cake", "Lentil Soup"]);

        let second = recipes.get_trending(2, 2).await.unwrap();
        assert_eq!(names(&second), vec!["Crepes", "Tofu Stir Fry"]);

        let third = recipes.get_trending(3, 2).await.unwrap();
        assert_eq!(names(&third), vec!["Carrot Salad"]);

        assert!(recipes.get_trending(4, 2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_trending_length_bounded_by_page_size() {
        let recipes = seeded().await;
        for size in 1..=6 {
            for number in 1..=6 {
                let page = recipes.get_trending(number, size).await.unwrap();
                assert!(page.len() as i64 <= size);
            }
        }
    }

    #[tokio::test]
    async fn test_trending_rejects_page_zero() {
        let recipes = seeded().await;
        let err = recipes.get_trending(0, 10).await.unwrap_err();
        assert_eq!(err, StoreError::InvalidPage { number: 0, size: 10 });
    }

    #[tokio::test]
    async fn test_create_then_get_by_id() {
        let recipes = Recipes::new(MemoryStore::new());
        let input = NewRecipe::new("Focaccia", "baker").with_tags(["bread"]);

        let created = recipes.create(input.clone()).await.unwrap();
        let fetched = recipes
            .get_recipe_by_id(&created.id.to_string())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(fetched, Recipe::from_new(created.id, input));
    }

    #[tokio::test]
    async fn test_get_by_id_missing_and_malformed() {
        let recipes = seeded().await;

        let missing = recipes
            .get_recipe_by_id(&RecipeId::new().to_string())
            .await
            .unwrap();
        assert!(missing.is_none());

        let err = recipes.get_recipe_by_id("42").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidId(_)));
    }

    #[tokio::test]
    async fn test_by_tag_is_exact() {
        let recipes = seeded().await;
        let vegan = recipes.get_recipes_by_tag("vegan").await.unwrap();
        assert_eq!(names(&vegan), vec!["Lentil Soup"]);
        assert!(vegan.iter().all(|r| r.tags.iter().any(|t| t == "vegan")));
    }

    #[tokio::test]
    async fn test_by_user_id() {
        let recipes = seeded().await;
        let greens = recipes.get_recipes_by_user_id("greens").await.unwrap();
        assert_eq!(names(&greens), vec!["Lentil Soup", "Tofu Stir Fry", "Carrot Salad"]);
        assert!(recipes.get_recipes_by_user_id("green").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_unions_name_tags_and_user() {
        let recipes = seeded().await;
        let found = recipes.get_recipes_from_search("CAKE").await.unwrap();
        // name, userid and tag matches respectively
        assert_eq!(
            names(&found),
            vec!["Chocolate Cake", "Crepes", "Carrot Salad"]
        );
    }

    #[tokio::test]
    async fn test_search_treats_input_literally() {
        let recipes = seeded().await;
        assert!(recipes.get_recipes_from_search(".*").await.unwrap().is_empty());
        assert!(recipes.get_recipes_from_search("(a+)+$").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_accounts_and_tokens() {
        let store = MemoryStore::new();
        store.create_account("chef", "hash").await.unwrap();
        assert_eq!(
            store.create_account("chef", "other").await.unwrap_err(),
            StoreError::Conflict("chef".to_string())
        );
        assert_eq!(
            store.find_account("chef").await.unwrap().unwrap().password_hash,
            "hash"
        );

        let token = AuthToken {
            token: "abc".into(),
            username: "chef".into(),
            expires_at: Utc::now() + Duration::hours(1),
        };
        store.insert_token(&token).await.unwrap();
        assert_eq!(store.find_token("abc").await.unwrap(), Some(token));

        store.revoke_token("abc").await.unwrap();
        assert!(store.find_token("abc").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_purge_expired_tokens() {
        let store = MemoryStore::new();
        let now = Utc::now();
        for (token, offset) in [("old", -2), ("live", 2)] {
            let token = AuthToken {
                token: token.into(),
                username: "chef".into(),
                expires_at: now + Duration::hours(offset),
            };
            store.insert_token(&token).await.unwrap();
        }

        assert_eq!(store.purge_expired_tokens(now).await.unwrap(), 1);
        assert!(store.find_token("old").await.unwrap().is_none());
        assert!(store.find_token("live").await.unwrap().is_some());
    }
}
