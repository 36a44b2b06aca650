//! Client-side session held in Dioxus context.
//!
//! [`SessionProvider`] restores the session from local storage once, then
//! hands a `Signal<ApiUser>`, an [`ApiClient`] and the server's
//! [`ClientSettings`] to everything below it.
//! Components read and replace the session through [`use_session`]; nothing
//! else touches storage directly.

use api::ClientSettings;
use dioxus::prelude::*;

use crate::client::ApiClient;

#[cfg(target_arch = "wasm32")]
const TOKEN_KEY: &str = "recipes.token";
#[cfg(target_arch = "wasm32")]
const USERNAME_KEY: &str = "recipes.username";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub token: String,
    pub username: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ApiUser {
    #[default]
    Anonymous,
    Authenticated(AuthenticatedUser),
}

impl ApiUser {
    pub fn authenticated(token: impl Into<String>, username: impl Into<String>) -> Self {
        ApiUser::Authenticated(AuthenticatedUser {
            token: token.into(),
            username: username.into(),
        })
    }

    pub fn deauthenticate(&mut self) {
        *self = ApiUser::Anonymous;
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            ApiUser::Authenticated(user) => Some(&user.token),
            ApiUser::Anonymous => None,
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            ApiUser::Authenticated(user) => Some(&user.username),
            ApiUser::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, ApiUser::Authenticated(_))
    }

    /// Session saved by a previous page load, if any.
    pub fn restore() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
            if let Some(storage) = storage {
                let token = storage.get_item(TOKEN_KEY).ok().flatten();
                let username = storage.get_item(USERNAME_KEY).ok().flatten();
                if let (Some(token), Some(username)) = (token, username) {
                    return ApiUser::authenticated(token, username);
                }
            }
        }
        ApiUser::Anonymous
    }

    /// Write this session to local storage, or clear it when anonymous.
    pub fn persist(&self) {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten())
            else {
                tracing::warn!("local storage unavailable, session not persisted");
                return;
            };
            let result = match self {
                ApiUser::Authenticated(user) => storage
                    .set_item(TOKEN_KEY, &user.token)
                    .and_then(|_| storage.set_item(USERNAME_KEY, &user.username)),
                ApiUser::Anonymous => storage
                    .remove_item(TOKEN_KEY)
                    .and_then(|_| storage.remove_item(USERNAME_KEY)),
            };
            if result.is_err() {
                tracing::warn!("failed to update stored session");
            }
        }
    }
}

/// Current session. Panics outside a [`SessionProvider`].
pub fn use_session() -> Signal<ApiUser> {
    use_context::<Signal<ApiUser>>()
}

pub fn use_api_client() -> ApiClient {
    use_context::<ApiClient>()
}

/// Server settings; defaults until `GET /api/settings` answers.
pub fn use_client_settings() -> Signal<ClientSettings> {
    use_context::<Signal<ClientSettings>>()
}

#[component]
pub fn SessionProvider(children: Element) -> Element {
    let session = use_signal(ApiUser::restore);
    use_context_provider(|| session);
    let client = use_context_provider(ApiClient::from_origin);
    let mut settings = use_context_provider(|| Signal::new(ClientSettings::default()));

    let _loader = use_resource(move || {
        let client = client.clone();
        async move {
            match client.client_settings().await {
                Ok(loaded) => settings.set(loaded),
                Err(e) => tracing::warn!("Using default client settings: {}", e),
            }
        }
    });

    rsx! {
        {children}
    }
}

/// Full-page navigation, dropping all client state.
pub fn navigate_full(href: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if window.location().set_href(href).is_err() {
                tracing::error!("Failed to navigate to {}", href);
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    tracing::debug!("full-page navigation to {} ignored off the web", href);
}

pub fn reload() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if window.location().reload().is_err() {
                tracing::error!("Failed to reload page");
            }
        }
    }
}

/// Revoke the token, forget the session and reload the page.
#[component]
pub fn SignOutButton(
    #[props(default = "Sign out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut session = use_session();
    let client = use_api_client();

    let onclick = move |_| {
        let client = client.clone();
        async move {
            let token = session.peek().token().map(str::to_string);
            if let Some(token) = token {
                if let Err(e) = client.logout(&token).await {
                    tracing::warn!("Failed to revoke token: {}", e);
                }
            }
            session.write().deauthenticate();
            session.peek().persist();
            reload();
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
