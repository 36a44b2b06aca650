//! Recipe domain types, storage traits and the recipe query layer.

pub mod error;
pub mod models;
pub mod query;
pub mod repo;

mod memory;
pub use memory::MemoryStore;

pub use error::StoreError;
pub use models::{Account, AuthToken, NewRecipe, Recipe, RecipeId};
pub use query::{Page, RecipeFilter, SearchTerm};
pub use repo::{AccountStore, RecipeStore, Recipes};
