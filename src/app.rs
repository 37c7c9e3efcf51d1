use crate::handlers;
use crate::state::AppState;
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tracing::warn;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/increment-count", post(handlers::increment_count))
        .route("/api/get-count", get(handlers::get_count))
        .with_state(state)
}

/// Adds a CORS layer for `allowed_origin`; an unparsable origin is logged and skipped.
pub fn with_cors(router: Router, allowed_origin: Option<&str>) -> Router {
    let Some(origin) = allowed_origin else {
        return router;
    };

    match HeaderValue::from_str(origin) {
        Ok(origin) => router.layer(
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        ),
        Err(err) => {
            warn!("ignoring ALLOWED_ORIGIN {origin:?}: {err}");
            router
        }
    }
}
