use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use courtbook::config::AppConfig;
use courtbook::db;
use courtbook::handlers;
use courtbook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
        sessions: Mutex::new(HashSet::new()),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/", get(handlers::pages::index_page))
        .route("/login", get(handlers::pages::login_page))
        .route("/admin", get(handlers::pages::admin_page))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/logout", post(handlers::auth::logout))
        .route("/api/auth/session", get(handlers::auth::session))
        .route(
            "/api/admin/bookings",
            get(handlers::admin::get_bookings).post(handlers::admin::create_booking),
        )
        .route(
            "/api/admin/bookings/:id",
            delete(handlers::admin::delete_booking),
        )
        .route(
            "/api/admin/bookings/:id/payment",
            post(handlers::admin::record_payment),
        )
        .route("/api/admin/schedule", get(handlers::admin::get_schedule))
        .route(
            "/api/admin/clients",
            get(handlers::admin::get_clients).post(handlers::admin::create_client),
        )
        .route("/api/admin/stats", get(handlers::admin::get_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
