use crate::infrastructure::http::handlers;
use crate::SmartVal;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub fn create_router(app: Arc<SmartVal>) -> Router {
    Router::new()
        .route("/", get(handlers::info))
        .route("/predict", post(handlers::predict))
        .route("/forecast", post(handlers::forecast))
        .route("/history", get(handlers::history))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app)
}
