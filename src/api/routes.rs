//! API Routes
//!
//! Configures the Axum router with all monitoring API endpoints.

use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use super::handlers::{
    estado_handler, estado_list_handler, health_handler, index_handler, insertar_handler,
    notificar_handler, stats_handler, valor_handler, valor_min_handler, ver_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - Cache-Control: `public, max-age=<cache ttl>` unless a handler set one
/// - Compression: gzip when the client accepts it
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let cache_control = HeaderValue::from_str(&format!(
        "public, max-age={}",
        state.cache_ttl.as_secs()
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("no-cache"));

    Router::new()
        .route("/", get(index_handler))
        .route("/ver", get(ver_handler))
        .route("/valor", get(valor_handler))
        .route("/valor/min", get(valor_min_handler))
        .route("/estado", get(estado_list_handler).post(estado_handler))
        .route("/insertar", post(insertar_handler))
        .route("/notificar", post(notificar_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            cache_control,
        ))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
