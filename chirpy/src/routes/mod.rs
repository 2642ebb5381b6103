mod admin;
mod chirp;
mod health;
mod session;
mod user;

pub use chirp::clean_body;

use crate::{
    errors::{ApiError, Error},
    states::AppState,
};
use axum::{
    BoxError, Router,
    error_handling::HandleErrorLayer,
    http::StatusCode,
    middleware,
    routing::{get, post},
};
use std::{path::Path, time::Duration};
use tower::{Layer, ServiceBuilder, limit::GlobalConcurrencyLimitLayer};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

/// Requests served at once across every route.
pub const MAX_IN_FLIGHT_REQUESTS: usize = 1024;

/// Build the full router: JSON API under `/api`, admin pages under
/// `/admin`, and static files from `file_root` under `/app`.
pub fn router(state: AppState, file_root: impl AsRef<Path>) -> Router {
    let files = middleware::from_fn_with_state(state.clone(), admin::count_hits)
        .layer(ServeDir::new(file_root.as_ref()));

    let api = Router::new()
        .route("/healthz", get(health::health_check))
        .route("/reset", get(admin::reset))
        .route("/chirps", get(chirp::get_chirps).post(chirp::create_chirp))
        .route("/chirps/{id}", get(chirp::get_chirp))
        .route(
            "/users",
            get(user::get_users)
                .post(user::create_user)
                .put(user::update_user),
        )
        .route("/users/{id}", get(user::get_user))
        .route("/login", post(session::login))
        .route("/refresh", post(session::refresh))
        .route("/revoke", post(session::revoke));

    let admin_routes = Router::new().route("/metrics", get(admin::metrics));

    let app = Router::new()
        .nest("/api", api)
        .nest("/admin", admin_routes)
        .nest_service("/app", files)
        .with_state(state);

    with_middleware(app, MAX_IN_FLIGHT_REQUESTS)
}

/// Timeout, tracing and CORS, plus one concurrency limit shared by all
/// routes: `Router::layer` wraps each route separately, so the semaphore
/// has to come from a layer whose clones share it.
fn with_middleware(router: Router, max_in_flight: usize) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(GlobalConcurrencyLimitLayer::new(max_in_flight))
                .timeout(Duration::from_secs(10))
                .layer(TraceLayer::new_for_http()),
        )
        .layer(cors)
}

/// Run a synchronous store or bcrypt call on the blocking pool.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, Error> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::InternalError(format!("Blocking task failed: {}", e)))?
        .map_err(ApiError::from)
}

async fn handle_middleware_error(error: BoxError) -> (StatusCode, String) {
    if error.is::<tower::timeout::error::Elapsed>() {
        (StatusCode::REQUEST_TIMEOUT, "Request timed out".to_string())
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Unhandled internal error: {error}"),
        )
    }
}
