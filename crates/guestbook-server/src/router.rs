use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::{header::CONTENT_TYPE, HeaderName, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handler::{self, AppState, BLOCK_IP_HEADER, DRAWING_INDEX_HEADER, SECRET_KEY_HEADER};

pub const DRAWINGS_PATH: &str = "/api/drawings";

/// Build the axum router with all guestbook endpoints.
pub fn build_router(state: AppState, max_drawing_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            CONTENT_TYPE,
            HeaderName::from_static(SECRET_KEY_HEADER),
            HeaderName::from_static(DRAWING_INDEX_HEADER),
            HeaderName::from_static(BLOCK_IP_HEADER),
        ])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route(
            DRAWINGS_PATH,
            get(handler::list_drawings)
                .post(handler::submit_drawing)
                .delete(handler::delete_drawing),
        )
        .route("/health", get(handler::health_handler))
        .layer(DefaultBodyLimit::max(max_drawing_bytes))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
