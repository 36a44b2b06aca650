//! # HTTP client for the `/api` REST backend
//!
//! [`ApiClient`] wraps a [`reqwest::Client`] and a base URL. In the browser the base
//! is the page origin (reqwest on WASM goes through `fetch`, which needs absolute
//! URLs); natively it defaults to [`DEFAULT_BASE_URL`].
//!
//! Login and signup are special: they report the raw HTTP status on failure so the
//! login form can show it (see [`ClientError::status`]).

use api::{ClientSettings, Credentials, NewRecipe, Recipe, TokenResponse};
use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server answered {0}")]
    Status(u16),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

impl ClientError {
    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status(status) => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            ClientError::Url(_) => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    base: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Client pointed at the server that served this page.
    pub fn from_origin() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(origin) = web_sys::window().and_then(|w| w.location().origin().ok()) {
                return Self::new(origin);
            }
        }
        Self::new(DEFAULT_BASE_URL)
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Absolute URL of an `/api` path, e.g. `"/login"` → `"<base>/api/login"`.
    pub fn server_path(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}/api{}", self.base, path)
        } else {
            format!("{}/api/{}", self.base, path)
        }
    }

    /// URL built from individually percent-encoded path segments under `/api`.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.base)?;
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    async fn post_credentials(
        &self,
        path: &str,
        credentials: &Credentials,
        success: StatusCode,
    ) -> Result<TokenResponse, ClientError> {
        let response = self
            .http
            .post(self.server_path(path))
            .json(credentials)
            .send()
            .await?;
        if response.status() != success {
            return Err(ClientError::Status(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }

    /// `POST {path}` with `{username, pwd}`; only `200` counts as success.
    pub async fn login(
        &self,
        path: &str,
        credentials: &Credentials,
    ) -> Result<TokenResponse, ClientError> {
        self.post_credentials(path, credentials, StatusCode::OK).await
    }

    pub async fn signup(&self, credentials: &Credentials) -> Result<TokenResponse, ClientError> {
        self.post_credentials("/signup", credentials, StatusCode::CREATED)
            .await
    }

    pub async fn logout(&self, token: &str) -> Result<(), ClientError> {
        self.http
            .post(self.server_path("/logout"))
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Login path and page size the server is configured with.
    pub async fn client_settings(&self) -> Result<ClientSettings, ClientError> {
        self.get_json(self.url(&["settings"])?).await
    }

    pub async fn trending(&self, page: i64, size: i64) -> Result<Vec<Recipe>, ClientError> {
        let mut url = self.url(&["recipes"])?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("size", &size.to_string());
        self.get_json(url).await
    }

    /// `Ok(None)` when the server has no such recipe.
    pub async fn recipe(&self, id: &str) -> Result<Option<Recipe>, ClientError> {
        match self.get_json(self.url(&["recipes", id])?).await {
            Ok(recipe) => Ok(Some(recipe)),
            Err(ClientError::Status(404)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn by_tag(&self, tag: &str) -> Result<Vec<Recipe>, ClientError> {
        self.get_json(self.url(&["recipes", "tag", tag])?).await
    }

    pub async fn by_user(&self, userid: &str) -> Result<Vec<Recipe>, ClientError> {
        self.get_json(self.url(&["recipes", "user", userid])?).await
    }

    pub async fn search(&self, input: &str) -> Result<Vec<Recipe>, ClientError> {
        let mut url = self.url(&["recipes", "search"])?;
        url.query_pairs_mut().append_pair("q", input);
        self.get_json(url).await
    }

    pub async fn create(&self, token: &str, recipe: &NewRecipe) -> Result<Recipe, ClientError> {
        let response = self
            .http
            .post(self.url(&["recipes"])?)
            .bearer_auth(token)
            .json(recipe)
            .send()
            .await?;
        if response.status() != StatusCode::CREATED {
            return Err(ClientError::Status(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Status(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_path() {
        let client = ApiClient::new("http://example.test/");
        assert_eq!(client.server_path("/login"), "http://example.test/api/login");
        assert_eq!(client.server_path("signin"), "http://example.test/api/signin");
    }

    #[test]
    fn test_url_encodes_segments() {
        let client = ApiClient::new("http://example.test");
        let url = client.url(&["recipes", "tag", "gluten free/ish"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://example.test/api/recipes/tag/gluten%20free%2Fish"
        );
    }
}
