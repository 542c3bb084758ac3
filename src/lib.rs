//! Garage service backend
//!
//! Job card lifecycle (status machine, field locks, mechanic assignment),
//! the line-item ledger and invoice totals, exposed over a thin JSON API.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod migrator;
pub mod services;

use std::{sync::Arc, time::Duration};

use axum::{extract::FromRef, Router};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    auth::TokenVerifier, config::AppConfig, db::DbPool, events::EventSender,
    services::JobCardService,
};

/// Upper bound for one request, fan-out included.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub config: Arc<AppConfig>,
    pub job_cards: Arc<JobCardService>,
    pub token_verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(db: Arc<DbPool>, config: AppConfig, event_sender: EventSender) -> Self {
        let token_verifier = Arc::new(TokenVerifier::new(&config.jwt_secret, &config.jwt_issuer));
        let job_cards = Arc::new(JobCardService::new(db.clone(), Arc::new(event_sender)));
        Self {
            db,
            config: Arc::new(config),
            job_cards,
            token_verifier,
        }
    }
}

impl FromRef<AppState> for Arc<TokenVerifier> {
    fn from_ref(state: &AppState) -> Self {
        state.token_verifier.clone()
    }
}

/// Full HTTP application with tracing, timeout and CORS layers applied.
pub fn app_router(state: AppState) -> Router {
    let cors = if state.config.is_production() {
        CorsLayer::new()
    } else {
        CorsLayer::permissive()
    };

    handlers::api_routes()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(cors)
        .with_state(state)
}
