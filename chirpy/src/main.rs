// ============================================================================
// CHIRPY - posts, accounts and JWT sessions over a JSON document store
// ============================================================================

// - Users with bcrypt password hashing
// - Access/refresh JWTs with a persisted revocation list
// - Chirps with a length limit and profanity masking
// - Static file server with a hit counter
// - CORS, tracing, timeouts and a concurrency limit

use chirpy::{AppState, config::Config, routes};
use clap::Parser;
use std::error::Error;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "chirpy", about = "Chirpy API server")]
struct Args {
    /// Delete the database file before starting
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("chirpy=info,tower_http=info")),
        )
        .with_target(false)
        .compact()
        .init();

    dotenvy::dotenv().ok();

    let args = Args::parse();
    let config = Config::from_env()?;

    if args.debug {
        info!("Debug mode enabled, removing {}", config.database_file.display());
        if let Err(e) = std::fs::remove_file(&config.database_file) {
            warn!("Could not remove database file: {}", e);
        }
    }

    // Create application state
    let state = AppState::new(&config)?;
    let app = routes::router(state, &config.file_root);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("API Endpoints:");
    info!("  GET    /api/healthz        - Health check");
    info!("  GET    /api/chirps         - List chirps");
    info!("  GET    /api/chirps/:id     - Get specific chirp");
    info!("  POST   /api/chirps         - Create chirp (auth)");
    info!("  GET    /api/users          - List users");
    info!("  GET    /api/users/:id      - Get specific user");
    info!("  POST   /api/users          - Create account");
    info!("  PUT    /api/users          - Update own account (auth)");
    info!("  POST   /api/login          - Login");
    info!("  POST   /api/refresh        - New access token (refresh token)");
    info!("  POST   /api/revoke         - Revoke refresh token");
    info!("  GET    /admin/metrics      - File server hits");

    axum::serve(listener, app).await?;

    Ok(())
}
