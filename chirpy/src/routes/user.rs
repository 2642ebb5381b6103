use super::blocking;
use crate::{
    AppState,
    auth::authorize,
    dto::{UserRequest, UserResponse},
    errors::ApiError,
    models::User,
};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

/// POST /api/users
/// Body: { "email": "...", "password": "..." }
pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<UserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::ValidationError(e.to_string()))?;

    let db = Arc::clone(&state.db);
    let user = blocking(move || db.create_user(&payload.email, &payload.password)).await?;

    info!("New user registered: {}", user.email);

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/users
pub async fn get_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let db = Arc::clone(&state.db);
    let users = blocking(move || db.list_users()).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<UserResponse>, ApiError> {
    let db = Arc::clone(&state.db);
    let user = blocking(move || db.get_user(id)).await?;
    Ok(Json(user.into()))
}

/// PUT /api/users
/// Headers: Authorization: Bearer <access token>
/// Body: { "email": "...", "password": "..." }
///
/// Replaces both fields of the caller's account; the password is re-hashed.
pub async fn update_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<UserRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::ValidationError(e.to_string()))?;

    let user_id = authorize(&state, &headers)?;

    let db = Arc::clone(&state.db);
    let user = blocking(move || {
        db.update_user(User {
            id: user_id,
            email: payload.email,
            password_hash: payload.password,
        })
    })
    .await?;

    info!("User updated: {}", user.id);

    Ok(Json(user.into()))
}
