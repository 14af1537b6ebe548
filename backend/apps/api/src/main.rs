//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors go through
//! `catalog::CatalogError`.

use std::env;
use std::net::SocketAddr;

use axum::{
    http,
    http::{Method, header},
};
use base64::Engine;
use base64::engine::general_purpose;
use catalog::application::{DEFAULT_CLEANUP_INTERVAL, spawn_session_cleanup};
use catalog::{
    CatalogConfig, MemoryCatalogRepository, PgCatalogRepository, catalog_router,
    catalog_router_generic,
};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_ADDR: &str = "0.0.0.0:1337";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,catalog=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config()?;
    tracing::info!(?config, "Catalog configuration loaded");

    let catalog = match env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&database_url)
                .await?;

            tracing::info!("Connected to database");

            // Run migrations
            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            let repo = PgCatalogRepository::new(pool);
            spawn_session_cleanup(repo.clone(), DEFAULT_CLEANUP_INTERVAL);
            catalog_router(repo, config)
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage");
            let repo = MemoryCatalogRepository::new();
            spawn_session_cleanup(repo.clone(), DEFAULT_CLEANUP_INTERVAL);
            catalog_router_generic(repo, config)
        }
    };

    let app = catalog
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer());

    // Start server
    let addr: SocketAddr = env::var("CATALOG_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the catalog configuration from the environment
fn load_config() -> anyhow::Result<CatalogConfig> {
    let mut config = if cfg!(debug_assertions) {
        CatalogConfig::development()
    } else {
        CatalogConfig::default()
    };

    match env::var("SESSION_SECRET") {
        Ok(secret_b64) => config.session_secret = decode_secret(&secret_b64)?,
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("SESSION_SECRET not set, sessions will not survive a restart");
        }
        Err(_) => anyhow::bail!("SESSION_SECRET must be set in production"),
    }

    if let Ok(username) = env::var("ADMIN_USERNAME") {
        config.admin_username = username;
    }
    config.admin_secret = env::var("ADMIN_SECRET").ok().filter(|s| !s.is_empty());
    if config.admin_secret.is_none() {
        tracing::warn!("ADMIN_SECRET not set, admin login disabled");
    }

    Ok(config)
}

fn decode_secret(secret_b64: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = general_purpose::STANDARD.decode(secret_b64.trim())?;
    <[u8; 32]>::try_from(bytes.as_slice())
        .map_err(|_| anyhow::anyhow!("SESSION_SECRET must decode to 32 bytes"))
}

fn cors_layer() -> CorsLayer {
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:40922,http://127.0.0.1:40922".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .allow_credentials(true)
}
