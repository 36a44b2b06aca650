//! # Query vocabulary shared by every store backend
//!
//! - [`Page`]: 1-based pagination. `skip = (number - 1) * size`; a page number or
//!   size below 1 is rejected rather than producing a negative skip.
//! - [`RecipeFilter`]: which recipes a `find` selects: everything, an exact tag,
//!   an exact author, or a [`SearchTerm`].
//! - [`SearchTerm`]: a case-insensitive literal substring. The input is never
//!   interpreted as a pattern: backends that use `LIKE`/`ILIKE` get an escaped
//!   pattern from [`SearchTerm::like_pattern`].
//! - [`trending_order`]: the single sort used for listings: newest first, then
//!   most liked.

use std::cmp::Ordering;

use crate::error::StoreError;
use crate::models::Recipe;

/// A 1-based page of results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    number: i64,
    size: i64,
}

impl Page {
    pub fn new(number: i64, size: i64) -> Result<Self, StoreError> {
        let invalid = || StoreError::InvalidPage { number, size };
        if number < 1 || size < 1 {
            return Err(invalid());
        }
        // Reject pages whose offset does not fit.
        (number - 1).checked_mul(size).ok_or_else(invalid)?;
        Ok(Self { number, size })
    }

    pub fn number(&self) -> i64 {
        self.number
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    /// Number of items to skip before this page starts.
    pub fn skip(&self) -> i64 {
        (self.number - 1) * self.size
    }

    pub fn limit(&self) -> i64 {
        self.size
    }

    /// Slice an already sorted result set down to this page.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        let skip = usize::try_from(self.skip()).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit()).unwrap_or(usize::MAX);
        items.into_iter().skip(skip).take(limit).collect()
    }
}

/// Literal, case-insensitive substring to search for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchTerm {
    raw: String,
    needle: String,
}

impl SearchTerm {
    pub fn new(input: impl Into<String>) -> Self {
        let raw = input.into();
        let needle = raw.to_lowercase();
        Self { raw, needle }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether `haystack` contains the term, ignoring case.
    pub fn matches(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.needle)
    }

    /// `%term%` with `\`, `%` and `_` escaped, for `ILIKE ... ESCAPE '\'`.
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.raw.len() + 2);
        pattern.push('%');
        for c in self.raw.chars() {
            if matches!(c, '\\' | '%' | '_') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }
}

/// Selection applied by [`crate::RecipeStore::find`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecipeFilter {
    All,
    /// Exact match on one element of `tags`.
    Tag(String),
    /// Exact match on `userid`.
    User(String),
    /// Substring match on name, any tag, or userid.
    Search(SearchTerm),
}

impl RecipeFilter {
    pub fn matches(&self, recipe: &Recipe) -> bool {
        match self {
            RecipeFilter::All => true,
            RecipeFilter::Tag(tag) => recipe.has_tag(tag),
            RecipeFilter::User(userid) => recipe.userid == *userid,
            RecipeFilter::Search(term) => {
                term.matches(&recipe.name)
                    || recipe.tags.iter().any(|t| term.matches(t))
                    || term.matches(&recipe.userid)
            }
        }
    }
}

/// Date descending, then likes descending.
pub fn trending_order(a: &Recipe, b: &Recipe) -> Ordering {
    b.date.cmp(&a.date).then_with(|| b.likes.cmp(&a.likes))
}
