use crate::{errors::ApiError, states::AppState, tokens::ACCESS_ISSUER};
use axum::http::{HeaderMap, header};

/// The raw token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(ApiError::Unauthorized)?;

    Ok(token)
}

/// Id of the user behind a valid access token.
pub fn authorize(state: &AppState, headers: &HeaderMap) -> Result<u64, ApiError> {
    let token = bearer_token(headers)?;
    let claims = state.tokens.authenticate(token, ACCESS_ISSUER)?;
    Ok(claims.subject_id()?)
}
