//! Login, signup and logout endpoints.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use store::AccountStore;

use super::{AppState, Backend};
use crate::auth::{bearer_token, hash_password, issue_token, verify_password, MIN_PASSWORD_LEN};
use crate::error::{ApiError, ApiResult};
use crate::models::{Credentials, TokenResponse};

/// `POST /api/login` (path configurable): `200 {token}` or `401`. Usernames
/// are trimmed here exactly as at signup.
pub async fn login<S: Backend>(
    State(state): State<AppState<S>>,
    Json(credentials): Json<Credentials>,
) -> ApiResult<Json<TokenResponse>> {
    let username = credentials.username.trim();
    let Some(account) = state.store.find_account(username).await? else {
        tracing::info!("Login failed: unknown user {}", username);
        return Err(ApiError::Unauthorized);
    };

    let valid = verify_password(&credentials.pwd, &account.password_hash)
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    if !valid {
        tracing::info!("Login failed: wrong password for {}", account.username);
        return Err(ApiError::Unauthorized);
    }

    let token = issue_token(
        &state.store,
        &account.username,
        state.settings.auth.token_ttl_hours,
    )
    .await?;
    tracing::info!("User {} logged in", account.username);

    Ok(Json(TokenResponse { token: token.token }))
}

/// `POST /api/signup`: `201 {token}`, `400` on bad input, `409` if taken.
pub async fn signup<S: Backend>(
    State(state): State<AppState<S>>,
    Json(credentials): Json<Credentials>,
) -> ApiResult<(StatusCode, Json<TokenResponse>)> {
    let username = credentials.username.trim();
    if username.is_empty() {
        return Err(ApiError::BadRequest("Username is required".to_string()));
    }
    if credentials.pwd.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::BadRequest(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    let hash = hash_password(&credentials.pwd).map_err(|e| ApiError::Internal(e.to_string()))?;
    let account = state.store.create_account(username, &hash).await?;
    let token = issue_token(
        &state.store,
        &account.username,
        state.settings.auth.token_ttl_hours,
    )
    .await?;
    tracing::info!("Registered user {}", account.username);

    Ok((StatusCode::CREATED, Json(TokenResponse { token: token.token })))
}

/// `POST /api/logout`: revokes the presented bearer token.
pub async fn logout<S: Backend>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
) -> ApiResult<StatusCode> {
    let token = bearer_token(&headers).ok_or(ApiError::Unauthorized)?;
    state.store.revoke_token(token).await?;
    Ok(StatusCode::NO_CONTENT)
}
