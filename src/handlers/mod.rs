pub mod common;
pub mod health;
pub mod job_cards;
pub mod settings;

use axum::{routing::get, Router};

use crate::AppState;

/// Versioned API routes plus the unauthenticated health check.
pub fn api_routes() -> Router<AppState> {
    let v1 = Router::new()
        .nest("/job-cards", job_cards::job_card_routes())
        .nest("/settings", settings::settings_routes());

    Router::new()
        .route("/health", get(health::health))
        .nest("/api/v1", v1)
}
