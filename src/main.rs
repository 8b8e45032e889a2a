//! Pañol lending server
//!
//! Main entry point for the computer-lab lending server: loads
//! configuration from the environment, connects the database pool, runs
//! migrations, and serves the role-gated HTTP API.

use axum::http::{HeaderValue, Method};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use panol_server::app_state::AppState;
use panol_server::auth::AuthService;
use panol_server::docente::DocenteService;
use panol_server::material::MaterialService;
use panol_server::prestamo::PrestamoService;
use panol_server::routes;
use panol_server::usuario::UsuarioService;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenvy::dotenv().ok();

    // Get configuration from environment
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgresql://localhost/panol".to_string());
    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set, using an insecure default");
        "change-me-in-production".to_string()
    });
    let jwt_expiration_hours = std::env::var("JWT_EXPIRATION_HOURS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(24);

    // Initialize database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Database connected successfully");

    sqlx::migrate!()
        .run(&db_pool)
        .await
        .expect("Failed to run migrations");

    let pool = Arc::new(db_pool);

    // Create shared app state
    let app_state = AppState::new(
        Arc::new(PrestamoService::new(pool.clone())),
        Arc::new(DocenteService::new(pool.clone())),
        Arc::new(MaterialService::new(pool.clone())),
        Arc::new(UsuarioService::new(pool.clone())),
        Arc::new(AuthService::new(pool, jwt_secret, jwt_expiration_hours)),
    );

    // Create the app router
    let app = routes::router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(configure_cors());

    // Get port from environment or default to 3000
    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .expect("PORT must be a number");

    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    tracing::info!("Server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

fn configure_cors() -> CorsLayer {
    let allowed_origins_str = std::env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default();

    if allowed_origins_str.is_empty() {
        tracing::warn!("CORS_ALLOWED_ORIGINS not set, allowing all origins (permissive)");
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins_str
        .split(',')
        .map(|s| s.trim().parse().expect("Invalid CORS origin"))
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}
