//! Postgres implementation of the store traits.

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use store::{
    Account, AccountStore, AuthToken, NewRecipe, Page, Recipe, RecipeFilter, RecipeId,
    RecipeStore, StoreError,
};
use uuid::Uuid;

use crate::models::RecipeRow;

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn backend(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

/// Append the `WHERE` clause selecting `filter`.
fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &RecipeFilter) {
    match filter {
        RecipeFilter::All => {}
        RecipeFilter::Tag(tag) => {
            query.push(" WHERE ").push_bind(tag.clone()).push(" = ANY(tags)");
        }
        RecipeFilter::User(userid) => {
            query.push(" WHERE userid = ").push_bind(userid.clone());
        }
        RecipeFilter::Search(term) => {
            let pattern = term.like_pattern();
            query
                .push(" WHERE name ILIKE ")
                .push_bind(pattern.clone())
                .push(r" ESCAPE '\'")
                .push(" OR userid ILIKE ")
                .push_bind(pattern.clone())
                .push(r" ESCAPE '\'")
                .push(" OR EXISTS (SELECT 1 FROM unnest(tags) AS tag WHERE tag ILIKE ")
                .push_bind(pattern)
                .push(r" ESCAPE '\')");
        }
    }
}

impl RecipeStore for PgStore {
    async fn insert(&self, recipe: NewRecipe) -> Result<Recipe, StoreError> {
        let row: RecipeRow = sqlx::query_as(
            "INSERT INTO recipes (id, name, tags, userid, likes, date, description, ingredients, steps, image)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(recipe.name)
        .bind(recipe.tags)
        .bind(recipe.userid)
        .bind(recipe.likes)
        .bind(recipe.date)
        .bind(recipe.description)
        .bind(recipe.ingredients)
        .bind(recipe.steps)
        .bind(recipe.image)
        .fetch_one(&self.pool)
        .await
        .map_err(backend)?;

        Ok(row.into_recipe())
    }

    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, StoreError> {
        let row: Option<RecipeRow> = sqlx::query_as("SELECT * FROM recipes WHERE id = $1")
            .bind(*id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;

        Ok(row.map(RecipeRow::into_recipe))
    }

    async fn find(
        &self,
        filter: &RecipeFilter,
        page: Option<Page>,
    ) -> Result<Vec<Recipe>, StoreError> {
        let mut query = QueryBuilder::<Postgres>::new("SELECT * FROM recipes");
        push_filter(&mut query, filter);
        query.push(" ORDER BY date DESC, likes DESC");
        if let Some(page) = page {
            query
                .push(" OFFSET ")
                .push_bind(page.skip())
                .push(" LIMIT ")
                .push_bind(page.limit());
        }

        let rows: Vec<RecipeRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(backend)?;

        Ok(rows.into_iter().map(RecipeRow::into_recipe).collect())
    }
}

impl AccountStore for PgStore {
    async fn create_account(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<Account, StoreError> {
        let row: (String, String, DateTime<Utc>) = sqlx::query_as(
            "INSERT INTO users (username, password_hash) VALUES ($1, $2)
             RETURNING username, password_hash, created_at",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                StoreError::Conflict(username.to_string())
            }
            e => backend(e),
        })?;

        Ok(Account {
            username: row.0,
            password_hash: row.1,
            created_at: row.2,
        })
    }

    async fn find_account(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let row: Option<(String, String, DateTime<Utc>)> = sqlx::query_as(
            "SELECT username, password_hash, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        Ok(row.map(|(username, password_hash, created_at)| Account {
            username,
            password_hash,
            created_at,
        }))
    }

    async fn insert_token(&self, token: &AuthToken) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO auth_tokens (token, username, expires_at) VALUES ($1, $2, $3)")
            .bind(&token.token)
            .bind(&token.username)
            .bind(token.expires_at)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn find_token(&self, token: &str) -> Result<Option<AuthToken>, StoreError> {
        let row: Option<(String, String, DateTime<Utc>)> = sqlx::query_as(
            "SELECT token, username, expires_at FROM auth_tokens WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        Ok(row.map(|(token, username, expires_at)| AuthToken {
            token,
            username,
            expires_at,
        }))
    }

    async fn revoke_token(&self, token: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM auth_tokens WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn purge_expired_tokens(&self, now: DateTime<Utc>) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM auth_tokens WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(result.rows_affected())
    }
}

/// These run against a real database: `DATABASE_URL=... cargo test -p api
/// --features server -- --ignored`. Each test works under its own random
/// username so runs do not see each other's rows.
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use sqlx::postgres::PgPoolOptions;
    use store::SearchTerm;

    async fn connect() -> PgStore {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .connect(&url)
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        PgStore::new(pool)
    }

    fn unique(prefix: &str) -> String {
        format!("{prefix}_{}", Uuid::new_v4().simple())
    }

    /// Recipes by `cook` only, so rows from other runs are ignored.
    async fn find_own(store: &PgStore, filter: RecipeFilter, cook: &str) -> Vec<String> {
        store
            .find(&filter, None)
            .await
            .unwrap()
            .into_iter()
            .filter(|r| r.userid == cook)
            .map(|r| r.name)
            .collect()
    }

    async fn seed(store: &PgStore, cook: &str) {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let rows = [
            ("Cheesecake", vec!["dessert"], 0, 1),
            ("Vegan Chili", vec!["vegan"], 1, 5),
            ("Bean Salad", vec!["vegan-ish", "50%_off"], 1, 9),
            ("Apple Pie", vec!["dessert"], 2, 0),
        ];
        for (name, tags, age, likes) in rows {
            let recipe = NewRecipe::new(name, cook)
                .with_tags(tags)
                .with_likes(likes)
                .with_date(base - Duration::days(age));
            store.insert(recipe).await.unwrap();
        }
    }

    #[tokio::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn test_insert_then_find_by_id() {
        let store = connect().await;
        let cook = unique("cook");
        let input = NewRecipe::new("Focaccia", cook.as_str()).with_tags(["bread"]);

        let created = store.insert(input.clone()).await.unwrap();
        let fetched = store.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Focaccia");
        assert_eq!(fetched.tags, vec!["bread"]);
        assert_eq!(fetched.userid, cook);

        assert!(store.find_by_id(&RecipeId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn test_order_and_paging() {
        let store = connect().await;
        let cook = unique("cook");
        seed(&store, &cook).await;

        let user = RecipeFilter::User(cook.clone());
        assert_eq!(
            find_own(&store, user.clone(), &cook).await,
            vec!["Cheesecake", "Bean Salad", "Vegan Chili", "Apple Pie"]
        );

        let second: Vec<String> = store
            .find(&user, Some(Page::new(2, 3).unwrap()))
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(second, vec!["Apple Pie"]);
    }

    #[tokio::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn test_tag_is_exact() {
        let store = connect().await;
        let cook = unique("cook");
        seed(&store, &cook).await;

        let vegan = find_own(&store, RecipeFilter::Tag("vegan".into()), &cook).await;
        assert_eq!(vegan, vec!["Vegan Chili"]);
    }

    #[tokio::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn test_search_is_literal_and_case_insensitive() {
        let store = connect().await;
        let cook = unique("cook");
        seed(&store, &cook).await;

        let search = |input: &str| RecipeFilter::Search(SearchTerm::new(input));

        assert_eq!(
            find_own(&store, search("CAKE"), &cook).await,
            vec!["Cheesecake"]
        );
        // matches a tag, not every row
        assert_eq!(find_own(&store, search("%"), &cook).await, vec!["Bean Salad"]);
        assert_eq!(
            find_own(&store, search("0%_O"), &cook).await,
            vec!["Bean Salad"]
        );
        // userid matches
        assert_eq!(find_own(&store, search(&cook.to_uppercase()), &cook).await.len(), 4);
    }

    #[tokio::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn test_accounts_and_tokens() {
        let store = connect().await;
        let username = unique("chef");

        store.create_account(&username, "hash").await.unwrap();
        assert_eq!(
            store.create_account(&username, "other").await.unwrap_err(),
            StoreError::Conflict(username.clone())
        );
        assert_eq!(
            store.find_account(&username).await.unwrap().unwrap().password_hash,
            "hash"
        );

        let now = Utc::now();
        let live = AuthToken {
            token: unique("live"),
            username: username.clone(),
            expires_at: now + Duration::hours(1),
        };
        let stale = AuthToken {
            token: unique("stale"),
            username: username.clone(),
            expires_at: now - Duration::hours(1),
        };
        store.insert_token(&live).await.unwrap();
        store.insert_token(&stale).await.unwrap();

        assert!(store.purge_expired_tokens(now).await.unwrap() >= 1);
        assert!(store.find_token(&stale.token).await.unwrap().is_none());
        assert_eq!(
            store.find_token(&live.token).await.unwrap().map(|t| t.username),
            Some(username)
        );

        store.revoke_token(&live.token).await.unwrap();
        assert!(store.find_token(&live.token).await.unwrap().is_none());
    }
}
