use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

/// Failures raised by the store, the credential manager and the token
/// service. None of them are logged here; callers decide what to surface.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("not found")]
    NotFound,
    #[error("a user with that email already exists")]
    Conflict,
    #[error("database io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("database encoding error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

impl Error {
    /// Read, write and parse failures of the backing file.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_) | Error::Json(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("malformed token")]
    Malformed,
    #[error("token signature does not verify")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("invalid token issuer: expected {expected}, found {found}")]
    WrongIssuer { expected: String, found: String },
    #[error("token is revoked")]
    Revoked,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("token must expire after it is issued")]
    InvalidExpiry,
    #[error("token signing failed: {0}")]
    Signing(String),
}

#[derive(Debug)]
pub enum ApiError {
    InvalidCredentials,
    UserAlreadyExists,
    Unauthorized,
    NotFound,
    TooManyRequests,
    ValidationError(String),
    InternalError(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound => ApiError::NotFound,
            Error::Conflict => ApiError::UserAlreadyExists,
            Error::Auth(AuthError::InvalidCredentials) => ApiError::InvalidCredentials,
            Error::Auth(AuthError::Signing(msg)) => ApiError::InternalError(msg),
            Error::Auth(_) => ApiError::Unauthorized,
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Error::Auth(err).into()
    }
}

/// Convert our custom errors to HTTP responses
///
/// The body is always `{"error": "..."}`. Internal details are logged and
/// replaced by a generic message.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            ApiError::UserAlreadyExists => (StatusCode::CONFLICT, "User already exists"),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not Found"),
            ApiError::TooManyRequests => (StatusCode::TOO_MANY_REQUESTS, "Too many requests"),
            ApiError::ValidationError(msg) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({
                      "error": msg
                    })),
                )
                    .into_response();
            }
            ApiError::InternalError(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        (
            status,
            Json(serde_json::json!({
              "error": message
            })),
        )
            .into_response()
    }
}
