use axum::Router;
use http::header::CONTENT_TYPE;
use http::Method;
use tower_http::cors::{Any, CorsLayer};

use crate::routes::{health, payback, roi};
use crate::state::AppState;

/// Any `OPTIONS` request is answered by the CORS layer with 200 and the
/// allowed methods and headers; every other response carries
/// `Access-Control-Allow-Origin: *`.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    let roi_route = state.config.roi_route.clone();

    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest(&roi_route, roi::router())
        .nest("/api/payback", payback::router())
        .layer(cors)
        .with_state(state)
}
