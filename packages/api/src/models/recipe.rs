//! Database row for the `recipes` table.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use store::Recipe;
use uuid::Uuid;

/// Full recipe row as selected with `SELECT *`.
#[derive(Debug, Clone, FromRow)]
pub struct RecipeRow {
    pub id: Uuid,
    pub name: String,
    pub tags: Vec<String>,
    pub userid: String,
    pub likes: i64,
    pub date: DateTime<Utc>,
    pub description: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub image: Option<String>,
}

impl RecipeRow {
    pub fn into_recipe(self) -> Recipe {
        Recipe {
            id: self.id.into(),
            name: self.name,
            tags: self.tags,
            userid: self.userid,
            likes: self.likes,
            date: self.date,
            description: self.description,
            ingredients: self.ingredients,
            steps: self.steps,
            image: self.image,
        }
    }
}
