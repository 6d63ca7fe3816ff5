//! Transaction handlers
//!
//! Transactions are created under a budget taken from the URL path; the
//! recording user comes from the session.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::dto::{CreateTransactionRequest, TransactionResponse};
use crate::error::{ApiError, ApiResult};
use crate::extractors::RequireUser;
use crate::state::AppState;

/// POST /api/v1/budgets/:id/transactions - record a transaction
pub async fn create_transaction(
    RequireUser(user): RequireUser,
    State(state): State<Arc<AppState>>,
    Path(budget_id): Path<Uuid>,
    Json(req): Json<CreateTransactionRequest>,
) -> ApiResult<(StatusCode, Json<TransactionResponse>)> {
    if req.type_of.trim().is_empty() {
        return Err(ApiError::BadRequest("type_of must not be empty".to_string()));
    }

    // The budget must exist before we attach a transaction to it
    state
        .db
        .budget_repo()
        .find_by_id(budget_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("budget {}", budget_id)))?;

    let tx = state
        .db
        .transaction_repo()
        .create(budget_id, user.id, &req.type_of, req.amount, &req.description)
        .await?;

    tracing::info!(transaction_id = %tx.id, budget_id = %budget_id, "Transaction recorded");

    Ok((StatusCode::CREATED, Json(TransactionResponse::from(tx))))
}

/// GET /api/v1/budgets/:id/transactions - list a budget's transactions
pub async fn list_transactions(
    RequireUser(_user): RequireUser,
    State(state): State<Arc<AppState>>,
    Path(budget_id): Path<Uuid>,
) -> ApiResult<Json<Vec<TransactionResponse>>> {
    state
        .db
        .budget_repo()
        .find_by_id(budget_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("budget {}", budget_id)))?;

    let transactions = state
        .db
        .transaction_repo()
        .list_for_budget(budget_id)
        .await?
        .into_iter()
        .map(TransactionResponse::from)
        .collect();

    Ok(Json(transactions))
}
