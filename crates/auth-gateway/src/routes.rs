use axum::{http::StatusCode, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::auth;
use crate::cors::OriginGuard;
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    let cors = OriginGuard::new(state.config.allowed_origins.iter().cloned()).layer();

    Router::new()
        .route("/health", get(health_check))
        .route("/login", get(auth::login))
        .route("/login-google", get(auth::login_google))
        .route("/authenticate", get(auth::authenticate))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> StatusCode {
    StatusCode::OK
}
