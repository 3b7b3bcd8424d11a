pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE, LOCATION},
        HeaderValue, Method,
    },
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::{AppConfig, SecurityConfig};
use crate::state::AppState;

/// Build the full application router
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        // Protected
        .nest("/api/gratitudes", gratitude_routes(state.clone()))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .with_state(state);

    // Global middleware
    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    router
}

/// `/api/gratitudes` pipeline: `require_auth` → (item routes) `load_gratitude` → handler
fn gratitude_routes(state: AppState) -> Router<AppState> {
    use handlers::gratitudes;

    let item = Router::new()
        .route(
            "/:gratitude_id",
            get(gratitudes::get_one)
                .delete(gratitudes::delete_one)
                .patch(gratitudes::update_one),
        )
        .route_layer(from_fn_with_state(state.clone(), middleware::load_gratitude));

    Router::new()
        .route("/", get(gratitudes::list).post(gratitudes::create))
        .merge(item)
        .route_layer(from_fn_with_state(state, middleware::require_auth))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .expose_headers([LOCATION])
}
