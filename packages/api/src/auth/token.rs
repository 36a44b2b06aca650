//! # Bearer tokens
//!
//! Tokens are 32 random bytes, hex encoded, stored through
//! [`AccountStore::insert_token`] with an expiry. Requests present them as
//! `Authorization: Bearer <token>`; [`authenticate`] resolves one back to its
//! username and drops it if it has expired.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use chrono::{Duration, Utc};
use rand::RngCore;
use store::{AccountStore, AuthToken, StoreError};

use crate::error::ApiError;

/// Create and store a fresh token for `username`. Expired tokens of every
/// user are swept first.
pub async fn issue_token<S: AccountStore>(
    store: &S,
    username: &str,
    ttl_hours: i64,
) -> Result<AuthToken, StoreError> {
    match store.purge_expired_tokens(Utc::now()).await {
        Ok(0) => {}
        Ok(n) => tracing::debug!("Purged {} expired tokens", n),
        Err(e) => tracing::warn!("Failed to purge expired tokens: {}", e),
    }

    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);

    let token = AuthToken {
        token: hex::encode(bytes),
        username: username.to_string(),
        expires_at: Utc::now() + Duration::hours(ttl_hours),
    };
    store.insert_token(&token).await?;
    Ok(token)
}

/// The token from an `Authorization: Bearer` header, if any.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Resolve the request's bearer token to a username.
pub async fn authenticate<S: AccountStore + Sync>(
    store: &S,
    headers: &HeaderMap,
) -> Result<String, ApiError> {
    let token = bearer_token(headers).ok_or(ApiError::Unauthorized)?;
    let Some(found) = store.find_token(token).await? else {
        return Err(ApiError::Unauthorized);
    };
    if found.is_expired(Utc::now()) {
        tracing::info!("Rejecting expired token for {}", found.username);
        store.revoke_token(&found.token).await?;
        return Err(ApiError::Unauthorized);
    }
    Ok(found.username)
}
