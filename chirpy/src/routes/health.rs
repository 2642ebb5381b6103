/// GET /api/healthz
/// Response: 200 OK, text/plain
pub async fn health_check() -> &'static str {
    "OK"
}
