//! # Login form model
//!
//! [`LoginForm`] holds what the login view shows: the two credential fields and
//! the status of the last failed attempt (`0` when there is none). Rendering and
//! navigation stay in the view; everything observable about a login attempt
//! comes back as a [`LoginOutcome`] so it can be tested without a browser.
//!
//! | Server answer | Outcome |
//! |---------------|---------|
//! | `200 {token}` | [`LoginOutcome::Authenticated`], destination from `?redirect=` or `/app/` |
//! | any other status | [`LoginOutcome::Failed`] with that status |
//! | no answer | [`LoginOutcome::Failed`] with [`UNAVAILABLE`] |

use api::Credentials;
use dioxus::prelude::*;

use crate::client::{ApiClient, ClientError};
use crate::session::ApiUser;

/// Where a login without `?redirect=` ends up, via full-page navigation.
pub const DEFAULT_DESTINATION: &str = "/app/";

/// Status recorded when the request never got an HTTP answer.
pub const UNAVAILABLE: u16 = 503;

pub const DEFAULT_LOGIN_PATH: &str = "/login";

/// Where to go after logging in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    /// Client-side route taken from the `redirect` query parameter.
    Route(String),
    /// Full-page navigation.
    Reload(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    Authenticated {
        user: ApiUser,
        destination: Destination,
    },
    Failed(u16),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginForm {
    username: String,
    password: String,
    login_status: u16,
    login_path: String,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new(DEFAULT_LOGIN_PATH)
    }
}

impl LoginForm {
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            login_status: 0,
            login_path: login_path.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Status of the last failed attempt, `0` if none.
    pub fn login_status(&self) -> u16 {
        self.login_status
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    /// Point the form at the login route the server is configured with.
    pub fn set_login_path(&mut self, login_path: impl Into<String>) {
        self.login_path = login_path.into();
    }

    pub fn set_username(&mut self, username: impl Into<String>) {
        self.username = username.into();
        self.login_status = 0;
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
        self.login_status = 0;
    }

    pub fn failure_message(&self) -> Option<String> {
        (self.login_status != 0).then(|| format!("Login failed: {}", self.login_status))
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.password.clone())
    }

    /// Post the credentials to the login path. `redirect_query` is the page's
    /// query string (with or without the leading `?`).
    pub async fn submit(&self, client: &ApiClient, redirect_query: Option<&str>) -> LoginOutcome {
        let result = client.login(&self.login_path, &self.credentials()).await;
        self.outcome(result.map(|r| r.token), redirect_query)
    }

    /// Create the account, then behave like a successful login.
    pub async fn register(&self, client: &ApiClient, redirect_query: Option<&str>) -> LoginOutcome {
        let result = client.signup(&self.credentials()).await;
        self.outcome(result.map(|r| r.token), redirect_query)
    }

    fn outcome(
        &self,
        token: Result<String, ClientError>,
        redirect_query: Option<&str>,
    ) -> LoginOutcome {
        match token {
            Ok(token) => LoginOutcome::Authenticated {
                user: ApiUser::authenticated(token, self.username.clone()),
                destination: post_login_destination(redirect_query),
            },
            Err(e) => {
                tracing::warn!("Login failed: {}", e);
                LoginOutcome::Failed(e.status().unwrap_or(UNAVAILABLE))
            }
        }
    }

    /// Record a failed outcome so the template shows it.
    pub fn apply(&mut self, outcome: &LoginOutcome) {
        if let LoginOutcome::Failed(status) = outcome {
            self.login_status = *status;
        }
    }
}

pub fn post_login_destination(query: Option<&str>) -> Destination {
    let redirect = query.and_then(|q| {
        url::form_urlencoded::parse(q.trim_start_matches('?').as_bytes())
            .find(|(key, _)| key == "redirect")
            .map(|(_, value)| value.into_owned())
    });
    match redirect {
        Some(target) if !target.is_empty() => Destination::Route(target),
        _ => Destination::Reload(DEFAULT_DESTINATION.to_string()),
    }
}

/// Query string of the current page.
pub fn current_query() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    let query = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .filter(|s| !s.is_empty());
    #[cfg(not(target_arch = "wasm32"))]
    let query = None;
    query
}

#[component]
pub fn LoginFailure(status: u16) -> Element {
    if status == 0 {
        return rsx! {};
    }
    rsx! {
        div {
            class: "px-2.5 py-2.5 bg-red-50 border border-red-200 rounded text-red-600 text-[0.8125rem]",
            role: "alert",
            "Login failed: {status}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    /// Serve `app` on an ephemeral port and return a client pointed at it.
    async fn serve(app: Router) -> ApiClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        ApiClient::new(format!("http://{addr}"))
    }

    fn filled_form() -> LoginForm {
        let mut form = LoginForm::default();
        form.set_username("chef");
        form.set_password("hunter22");
        form
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_login_success_navigates_to_app() {
        let received = Arc::new(Mutex::new(Value::Null));
        let seen = received.clone();
        let app = Router::new().route(
            "/api/login",
            post(move |Json(body): Json<Value>| async move {
                *seen.lock().unwrap() = body;
                Json(json!({"token": "abc"}))
            }),
        );
        let client = serve(app).await;

        let form = filled_form();
        let outcome = form.submit(&client, None).await;

        assert_eq!(
            outcome,
            LoginOutcome::Authenticated {
                user: ApiUser::authenticated("abc", "chef"),
                destination: Destination::Reload("/app/".to_string()),
            }
        );
        assert_eq!(
            *received.lock().unwrap(),
            json!({"username": "chef", "pwd": "hunter22"})
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_login_follows_redirect_param() {
        let app = Router::new().route(
            "/api/login",
            post(|| async { Json(json!({"token": "abc"})) }),
        );
        let client = serve(app).await;

        let outcome = filled_form()
            .submit(&client, Some("?redirect=%2Fapp%2Fnew&x=1"))
            .await;
        let LoginOutcome::Authenticated { destination, .. } = outcome else {
            panic!("expected success, got {outcome:?}");
        };
        assert_eq!(destination, Destination::Route("/app/new".to_string()));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_login_failure_records_status() {
        let app = Router::new().route(
            "/api/login",
            post(|| async { (StatusCode::UNAUTHORIZED, Json(json!({"error": "nope"}))) }),
        );
        let client = serve(app).await;

        let mut form = filled_form();
        let outcome = form.submit(&client, None).await;
        assert_eq!(outcome, LoginOutcome::Failed(401));

        form.apply(&outcome);
        assert_eq!(form.login_status(), 401);
        assert_eq!(form.failure_message().as_deref(), Some("Login failed: 401"));
        assert_eq!(form.username(), "chef");
        assert_eq!(form.password(), "hunter22");

        let mut dom = VirtualDom::new_with_props(
            LoginFailure,
            LoginFailureProps {
                status: form.login_status(),
            },
        );
        dom.rebuild_in_place();
        assert!(dioxus_ssr::render(&dom).contains("Login failed: 401"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_login_uses_configured_path() {
        let app = Router::new().route(
            "/api/signin",
            post(|| async { Json(json!({"token": "abc"})) }),
        );
        let client = serve(app).await;

        let mut form = LoginForm::new("/signin");
        form.set_username("chef");
        form.set_password("hunter22");
        assert!(matches!(
            form.submit(&client, None).await,
            LoginOutcome::Authenticated { .. }
        ));

        // default path is not served here
        assert_eq!(filled_form().submit(&client, None).await, LoginOutcome::Failed(404));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_login_follows_server_settings() {
        let app = Router::new()
            .route(
                "/api/settings",
                get(|| async { Json(json!({"login_path": "/signin", "page_size": 12})) }),
            )
            .route(
                "/api/signin",
                post(|| async { Json(json!({"token": "abc"})) }),
            );
        let client = serve(app).await;

        let settings = client.client_settings().await.unwrap();
        let mut form = filled_form();
        form.set_login_path(settings.login_path);
        assert_eq!(form.login_path(), "/signin");
        assert!(matches!(
            form.submit(&client, None).await,
            LoginOutcome::Authenticated { .. }
        ));
    }

    #[test]
    fn test_editing_clears_failure() {
        let mut form = filled_form();
        form.apply(&LoginOutcome::Failed(500));
        assert_eq!(form.failure_message().as_deref(), Some("Login failed: 500"));

        form.set_password("another");
        assert_eq!(form.login_status(), 0);
        assert!(form.failure_message().is_none());
    }

    #[test]
    fn test_post_login_destination() {
        assert_eq!(
            post_login_destination(None),
            Destination::Reload("/app/".to_string())
        );
        assert_eq!(
            post_login_destination(Some("redirect=")),
            Destination::Reload("/app/".to_string())
        );
        assert_eq!(
            post_login_destination(Some("?redirect=/app/tags/vegan")),
            Destination::Route("/app/tags/vegan".to_string())
        );
    }

    #[test]
    fn test_no_failure_renders_nothing() {
        let mut dom = VirtualDom::new_with_props(LoginFailure, LoginFailureProps { status: 0 });
        dom.rebuild_in_place();
        assert!(!dioxus_ssr::render(&dom).contains("Login failed"));
    }
}
