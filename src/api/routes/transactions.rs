//! Transaction Routes
//!
//! - GET /api/v1/transactions?user_id=&limit= - Recent operations

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::{TransactionsQuery, TransactionsResponse};
use crate::api::error::ApiResult;
use crate::api::extract::QueryParams;
use crate::api::state::AppState;
use crate::banking::BankingError;

/// Upper bound on `limit`
const MAX_LIMIT: usize = 50;

/// GET /api/v1/transactions
///
/// Newest first, together with the current balance.
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    QueryParams(query): QueryParams<TransactionsQuery>,
) -> ApiResult<Json<TransactionsResponse>> {
    let user = state
        .store
        .get_user(query.user_id)
        .map_err(BankingError::from)?
        .ok_or(BankingError::UserNotFound)?;

    let limit = query.limit.clamp(1, MAX_LIMIT);
    let transactions = state
        .store
        .recent_transactions(user.id, limit)
        .map_err(BankingError::from)?;

    Ok(Json(TransactionsResponse {
        success: true,
        balance: user.balance,
        transactions,
    }))
}
