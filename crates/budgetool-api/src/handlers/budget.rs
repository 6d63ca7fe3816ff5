//! Budget handlers
//!
//! The owner is always the logged-in user: list shows only the caller's
//! budgets and create stamps the caller as owner regardless of the
//! request body.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::dto::{BudgetDetailResponse, BudgetResponse, CreateBudgetRequest, TransactionResponse};
use crate::error::{ApiError, ApiResult};
use crate::extractors::RequireUser;
use crate::state::AppState;

/// GET /api/v1/budgets - list the caller's budgets
pub async fn list_budgets(
    RequireUser(user): RequireUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<BudgetResponse>>> {
    let budgets = state
        .db
        .budget_repo()
        .list_for_owner(&user.username)
        .await?;

    Ok(Json(budgets.into_iter().map(BudgetResponse::from).collect()))
}

/// POST /api/v1/budgets - create a budget owned by the caller
pub async fn create_budget(
    RequireUser(user): RequireUser,
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateBudgetRequest>,
) -> ApiResult<(StatusCode, Json<BudgetResponse>)> {
    if req.name.trim().is_empty() {
        return Err(ApiError::BadRequest("name must not be empty".to_string()));
    }

    let budget = state
        .db
        .budget_repo()
        .create(user.id, &req.name, req.total_budget)
        .await?;

    tracing::info!(budget_id = %budget.id, user_id = %user.id, "Budget created");

    // The caller is the owner, so no join is needed for the response
    let response = BudgetResponse {
        id: budget.id,
        owner: user.username,
        user: format!("/api/v1/users/{}", budget.user_id),
        name: budget.name,
        total_budget: budget.total_budget,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/budgets/:id - budget detail with its transactions
pub async fn get_budget(
    RequireUser(_user): RequireUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<BudgetDetailResponse>> {
    let budget = state
        .db
        .budget_repo()
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("budget {}", id)))?;

    let transactions = state
        .db
        .transaction_repo()
        .list_for_budget(id)
        .await?
        .into_iter()
        .map(TransactionResponse::from)
        .collect();

    Ok(Json(BudgetDetailResponse {
        budget: BudgetResponse::from(budget),
        transactions,
    }))
}
