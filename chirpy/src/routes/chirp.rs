use super::blocking;
use crate::{AppState, auth::authorize, dto::CreateChirpRequest, errors::ApiError, models::Chirp};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

const PROFANE_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

/// Mask profane words. Only whole space-separated words match, ignoring case.
pub fn clean_body(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            if PROFANE_WORDS.contains(&word.to_lowercase().as_str()) {
                "****"
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// POST /api/chirps
/// Headers: Authorization: Bearer <access token>
/// Body: { "body": "..." }
pub async fn create_chirp(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateChirpRequest>,
) -> Result<(StatusCode, Json<Chirp>), ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::ValidationError(e.to_string()))?;

    let author_id = authorize(&state, &headers)?;

    let body = clean_body(&payload.body);
    let db = Arc::clone(&state.db);
    let chirp = blocking(move || db.create_chirp(&body, author_id)).await?;

    info!("Chirp created: {} by user {}", chirp.id, author_id);

    Ok((StatusCode::CREATED, Json(chirp)))
}

/// GET /api/chirps
pub async fn get_chirps(State(state): State<AppState>) -> Result<Json<Vec<Chirp>>, ApiError> {
    let db = Arc::clone(&state.db);
    Ok(Json(blocking(move || db.list_chirps()).await?))
}

/// GET /api/chirps/{id}
pub async fn get_chirp(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Chirp>, ApiError> {
    let db = Arc::clone(&state.db);
    Ok(Json(blocking(move || db.get_chirp(id)).await?))
}
