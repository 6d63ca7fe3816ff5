//! Transaction DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use budgetool_db::DbTransaction;

/// Request body for recording a transaction.
///
/// The budget comes from the URL path and the owner from the session,
/// so neither appears here.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTransactionRequest {
    pub type_of: String,
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
}

/// Transaction representation returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub id: Uuid,
    /// Link to the owning budget resource
    pub budget: String,
    pub type_of: String,
    pub amount: Decimal,
    pub description: String,
}

impl From<DbTransaction> for TransactionResponse {
    fn from(tx: DbTransaction) -> Self {
        Self {
            id: tx.id,
            budget: format!("/api/v1/budgets/{}", tx.budget_id),
            type_of: tx.type_of,
            amount: tx.amount,
            description: tx.description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_create_request_has_no_budget_field() {
        // The parent budget comes from the URL path; a payload naming a
        // different budget still parses and the extra key is dropped
        let req: CreateTransactionRequest = serde_json::from_value(serde_json::json!({
            "type_of": "expense",
            "amount": "12.50",
            "description": "coffee",
            "budget": "/api/v1/budgets/00000000-0000-0000-0000-000000000000",
            "user_id": "00000000-0000-0000-0000-000000000000"
        }))
        .unwrap();

        assert_eq!(req.type_of, "expense");
        assert_eq!(req.amount, dec!(12.50));
        assert_eq!(req.description, "coffee");
    }
}
