//! Budget DTOs
//!
//! The owner is never accepted from the client; it is stamped from the
//! session. Responses carry the owner's username plus a link to the
//! owning user resource.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use budgetool_db::DbBudgetWithOwner;

use crate::dto::transaction::TransactionResponse;

/// Request body for creating a budget
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBudgetRequest {
    pub name: String,
    pub total_budget: Decimal,
}

/// Budget representation returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetResponse {
    pub id: Uuid,
    /// Owner's username
    pub owner: String,
    /// Link to the owning user resource
    pub user: String,
    pub name: String,
    pub total_budget: Decimal,
}

impl From<DbBudgetWithOwner> for BudgetResponse {
    fn from(budget: DbBudgetWithOwner) -> Self {
        Self {
            id: budget.id,
            owner: budget.owner_username,
            user: format!("/api/v1/users/{}", budget.user_id),
            name: budget.name,
            total_budget: budget.total_budget,
        }
    }
}

/// Budget detail with its transactions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetDetailResponse {
    #[serde(flatten)]
    pub budget: BudgetResponse,
    pub transactions: Vec<TransactionResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_create_request_has_no_owner_field() {
        // A payload that tries to name an owner still parses; the extra
        // keys are dropped because the struct has nowhere to put them
        let req: CreateBudgetRequest = serde_json::from_value(serde_json::json!({
            "name": "Groceries",
            "total_budget": "250.00",
            "owner": "mallory",
            "user": "/api/v1/users/00000000-0000-0000-0000-000000000000"
        }))
        .unwrap();

        assert_eq!(req.name, "Groceries");
        assert_eq!(req.total_budget, dec!(250.00));
    }
}
