//! # Domain models for recipes and accounts
//!
//! Defines the records held by a [`crate::RecipeStore`] / [`crate::AccountStore`].
//! Recipe types are `Serialize + Deserialize` so they can cross the server/client
//! boundary as JSON.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`RecipeId`] | Store-assigned identity of a recipe (a UUID). Parsing a malformed string fails with [`StoreError::InvalidId`]. |
//! | [`Recipe`] | A stored recipe: name, tags, owner (`userid`), likes, date and its content fields. |
//! | [`NewRecipe`] | Caller-supplied fields for a recipe that has not been stored yet. `likes` and `date` default when omitted. |
//! | [`Account`] | A local user account with its Argon2 password hash (server only, never serialised to clients). |
//! | [`AuthToken`] | A bearer token issued at login, bound to a username and an expiry. |

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;

/// Opaque recipe identifier assigned by the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(Uuid);

impl RecipeId {
    /// Allocate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier received from a caller.
    pub fn parse(s: &str) -> Result<Self, StoreError> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| StoreError::InvalidId(s.to_string()))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RecipeId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for RecipeId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl FromStr for RecipeId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A recipe as stored.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub tags: Vec<String>,
    /// Username of the author.
    pub userid: String,
    pub likes: i64,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl Recipe {
    /// Attach an identifier to caller-supplied fields.
    pub fn from_new(id: RecipeId, new: NewRecipe) -> Self {
        Self {
            id,
            name: new.name,
            tags: new.tags,
            userid: new.userid,
            likes: new.likes,
            date: new.date,
            description: new.description,
            ingredients: new.ingredients,
            steps: new.steps,
            image: new.image,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Fields for a recipe about to be created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub userid: String,
    #[serde(default)]
    pub likes: i64,
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub steps: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl NewRecipe {
    /// A recipe with just a name and an author, dated now.
    pub fn new(name: impl Into<String>, userid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: Vec::new(),
            userid: userid.into(),
            likes: 0,
            date: Utc::now(),
            description: String::new(),
            ingredients: Vec::new(),
            steps: Vec::new(),
            image: None,
        }
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_likes(mut self, likes: i64) -> Self {
        self.likes = likes;
        self
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }
}

/// A local account.
#[derive(Clone, Debug, PartialEq)]
pub struct Account {
    pub username: String,
    /// PHC-format Argon2 hash.
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Bearer token issued at login or signup.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthToken {
    pub token: String,
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

impl AuthToken {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}
