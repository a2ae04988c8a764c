use axum::{routing::get, Router};
use core_types::TimeRange;
use database::StoreRepository;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};
use tracing;

pub mod error;
pub mod fallback;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub repo: StoreRepository,
    /// Window applied when a request names no `timeRange`.
    pub default_time_range: TimeRange,
}

/// The main function to configure and run the web server.
///
/// Tracing is expected to be initialized by the calling binary; this
/// function only wires routes, middleware and state.
pub async fn run_server(addr: SocketAddr, default_time_range: TimeRange) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let db_pool = database::connect().await?;
    database::run_migrations(&db_pool).await?;
    let repo = StoreRepository::new(db_pool);

    let app_state = Arc::new(AppState {
        repo,
        default_time_range,
    });

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    // --- DEFINE THE APPLICATION ROUTES ---
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/products", get(handlers::get_products))
        .route("/api/analytics", get(handlers::get_analytics))
        .with_state(app_state)
        .layer(cors)
        // This middleware automatically logs information about every incoming request.
        .layer(TraceLayer::new_for_http());

    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
