// routes.rs
use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::{
    handler::{
        jobs::job_handler, messages::message_handler, notifications::notification_handler,
        profile::profile_handler,
    },
    middleware::auth,
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .nest("/jobs", job_handler().layer(middleware::from_fn(auth)))
        .nest("/messages", message_handler().layer(middleware::from_fn(auth)))
        .nest(
            "/notifications",
            notification_handler().layer(middleware::from_fn(auth)),
        )
        .nest("/profile", profile_handler().layer(middleware::from_fn(auth)))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
}
