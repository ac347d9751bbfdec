pub mod submit;

use axum::Router;
use axum::routing::{MethodRouter, get, post};

use crate::state::SharedState;

pub fn submission_routes() -> Router<SharedState> {
    Router::new()
        .route("/", submit_route())
        .route("/api/submit", submit_route())
}

pub fn health_routes() -> Router<SharedState> {
    Router::new().route("/health", get(health))
}

fn submit_route() -> MethodRouter<SharedState> {
    post(submit::submit)
        .options(submit::preflight)
        .fallback(submit::method_not_allowed)
}

async fn health() -> &'static str {
    "ok"
}
