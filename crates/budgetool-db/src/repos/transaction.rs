//! Transaction repository

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{DbResult, DbTransaction};

/// Transaction repository
pub struct TransactionRepo {
    pool: PgPool,
}

impl TransactionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a transaction under a budget.
    ///
    /// Both the parent budget and the recording user are server-derived;
    /// caller-supplied values for either never reach this method.
    pub async fn create(
        &self,
        budget_id: Uuid,
        user_id: Uuid,
        type_of: &str,
        amount: Decimal,
        description: &str,
    ) -> DbResult<DbTransaction> {
        let transaction = sqlx::query_as::<_, DbTransaction>(
            r#"
            INSERT INTO transactions (budget_id, user_id, type_of, amount, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, budget_id, user_id, type_of, amount, description, created_at
            "#,
        )
        .bind(budget_id)
        .bind(user_id)
        .bind(type_of)
        .bind(amount)
        .bind(description)
        .fetch_one(&self.pool)
        .await?;

        Ok(transaction)
    }

    /// List all transactions whose parent budget equals the given ID
    pub async fn list_for_budget(&self, budget_id: Uuid) -> DbResult<Vec<DbTransaction>> {
        let transactions = sqlx::query_as::<_, DbTransaction>(
            r#"
            SELECT id, budget_id, user_id, type_of, amount, description, created_at
            FROM transactions
            WHERE budget_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(budget_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(transactions)
    }
}
