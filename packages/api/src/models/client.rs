//! Settings the server hands to the web client.

use serde::{Deserialize, Serialize};

/// Answer of `GET /api/settings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Login route relative to `/api`, always with a leading `/`.
    pub login_path: String,
    /// Trending page size used when a request gives none.
    pub page_size: i64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            page_size: 12,
        }
    }
}
