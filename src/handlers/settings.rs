use crate::handlers::common::success_response;
use crate::{auth::Principal, errors::ServiceError, AppState};
use axum::{
    extract::{Json, State},
    response::Response,
    routing::get,
    Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub fn settings_routes() -> Router<AppState> {
    Router::new().route("/tax-rate", get(get_tax_rate).put(update_tax_rate))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TaxRateBody {
    pub tax_rate: Decimal,
}

async fn get_tax_rate(
    State(state): State<AppState>,
    _principal: Principal,
) -> Result<Response, ServiceError> {
    let tax_rate = state.job_cards.current_tax_rate().await?;
    Ok(success_response(TaxRateBody { tax_rate }))
}

/// Admin only. Recomputes every active job before responding.
async fn update_tax_rate(
    State(state): State<AppState>,
    principal: Principal,
    Json(payload): Json<TaxRateBody>,
) -> Result<Response, ServiceError> {
    let update = state
        .job_cards
        .update_tax_rate(payload.tax_rate, principal)
        .await?;
    Ok(success_response(update))
}
