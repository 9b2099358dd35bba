//! Transfer Routes
//!
//! - POST /api/v1/transfer - Send money from an account to a card

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{TransferRequest, TransferResponse};
use crate::api::error::ApiResult;
use crate::api::extract::JsonBody;
use crate::api::state::AppState;

/// POST /api/v1/transfer
pub async fn create_transfer(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<TransferRequest>,
) -> ApiResult<Json<TransferResponse>> {
    let outcome = state
        .transfers
        .transfer(req.user_id(), &req.to_card, &req.amount)?;

    Ok(Json(TransferResponse {
        success: true,
        message: outcome.message,
        new_balance: outcome.new_balance,
        transaction_id: outcome.transaction_id,
        transfer_details: outcome.details,
    }))
}
