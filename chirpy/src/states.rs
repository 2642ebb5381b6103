use crate::{
    config::Config, credentials::PasswordHasher, database::Db, errors::Error, tokens::TokenService,
};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

// ============================================================================
// APPLICATION STATE - Shared data across all requests
// ============================================================================
/// Cloned into every handler; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Db>,
    pub tokens: Arc<TokenService>,
    pub metrics: Arc<Metrics>,
    pub login_limiter: Arc<DefaultDirectRateLimiter>,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let db = Arc::new(
            Db::open(&config.database_file)?.with_hasher(PasswordHasher::new(config.bcrypt_cost)),
        );
        let tokens = Arc::new(TokenService::with_secret(&config.jwt_secret, Arc::clone(&db)));

        Ok(Self {
            db,
            tokens,
            metrics: Arc::new(Metrics::default()),
            login_limiter: Arc::new(RateLimiter::direct(Quota::per_second(
                config.login_rate_per_second,
            ))),
        })
    }
}

/// Request counters owned by the running server.
#[derive(Debug, Default)]
pub struct Metrics {
    fileserver_hits: AtomicU64,
}

impl Metrics {
    pub fn record_hit(&self) {
        self.fileserver_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn hits(&self) -> u64 {
        self.fileserver_hits.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.fileserver_hits.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_count_and_reset() {
        let metrics = Metrics::default();
        metrics.record_hit();
        metrics.record_hit();
        assert_eq!(metrics.hits(), 2);
        metrics.reset();
        assert_eq!(metrics.hits(), 0);
    }
}
