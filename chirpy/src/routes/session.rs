use super::blocking;
use crate::{
    AppState,
    auth::bearer_token,
    dto::{LoginResponse, TokenResponse, UserRequest},
    errors::ApiError,
    tokens::REFRESH_ISSUER,
};
use axum::{Json, extract::State, http::HeaderMap, http::StatusCode};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

/// POST /api/login
/// Body: { "email": "...", "password": "..." }
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<UserRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if state.login_limiter.check().is_err() {
        return Err(ApiError::TooManyRequests);
    }

    payload
        .validate()
        .map_err(|e| ApiError::ValidationError(e.to_string()))?;

    let db = Arc::clone(&state.db);
    let user = blocking(move || db.authenticate(&payload.email, &payload.password)).await?;

    let token = state.tokens.mint_access(user.id)?;
    let refresh_token = state.tokens.mint_refresh(user.id)?;

    info!("User logged in: {}", user.email);

    Ok(Json(LoginResponse {
        id: user.id,
        email: user.email,
        token,
        refresh_token,
    }))
}

/// POST /api/refresh
/// Headers: Authorization: Bearer <refresh token>
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, ApiError> {
    let refresh_token = bearer_token(&headers)?.to_string();

    let tokens = Arc::clone(&state.tokens);
    let token = blocking(move || tokens.refresh(&refresh_token)).await?;

    Ok(Json(TokenResponse { token }))
}

/// POST /api/revoke
/// Headers: Authorization: Bearer <refresh token>
pub async fn revoke(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let token = bearer_token(&headers)?.to_string();
    let claims = state.tokens.authenticate(&token, REFRESH_ISSUER)?;

    let tokens = Arc::clone(&state.tokens);
    blocking(move || tokens.revoke(&token)).await?;

    info!("Refresh token revoked for user {}", claims.subject);

    Ok(StatusCode::OK)
}
