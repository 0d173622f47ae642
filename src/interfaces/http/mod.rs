use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::Method;
use axum::http::header::CONTENT_TYPE;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

use crate::application::checkout::CheckoutEngine;

pub mod handlers;

use self::handlers::{capture_order, create_intent, get_order, health, user_orders};

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<CheckoutEngine>,
}

impl AppState {
    pub fn new(engine: CheckoutEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .allow_origin(Any)
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/health", get(health))
        .route("/api/orders/intent", post(create_intent))
        .route("/api/orders/capture", post(capture_order))
        .route("/api/orders/{id}", get(get_order))
        .route("/api/users/{user_id}/orders", get(user_orders))
        .layer(cors)
        .with_state(state)
}
