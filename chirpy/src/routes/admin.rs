use crate::states::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{Html, Response},
};

/// Counts every request that reaches the static file server.
pub async fn count_hits(State(state): State<AppState>, request: Request, next: Next) -> Response {
    state.metrics.record_hit();
    next.run(request).await
}

/// GET /admin/metrics
pub async fn metrics(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        "<html><body>\
         <h1>Welcome, Chirpy Admin</h1>\
         <p>Chirpy has been visited {} times!</p>\
         </body></html>",
        state.metrics.hits()
    ))
}

/// GET /api/reset
pub async fn reset(State(state): State<AppState>) -> String {
    state.metrics.reset();
    format!("Hits: {}", state.metrics.hits())
}
