//! Budget repository

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{DbBudget, DbBudgetWithOwner, DbResult};

/// Budget repository
pub struct BudgetRepo {
    pool: PgPool,
}

impl BudgetRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a budget owned by the given user.
    ///
    /// The owner is always the server-derived caller identity; a
    /// caller-supplied owner never reaches this method.
    pub async fn create(
        &self,
        user_id: Uuid,
        name: &str,
        total_budget: Decimal,
    ) -> DbResult<DbBudget> {
        let budget = sqlx::query_as::<_, DbBudget>(
            r#"
            INSERT INTO budgets (user_id, name, total_budget)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, name, total_budget, created_at
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(total_budget)
        .fetch_one(&self.pool)
        .await?;

        Ok(budget)
    }

    /// List budgets whose owner has the given username.
    ///
    /// Ownership equality is the only filter; no pagination or sorting
    /// options are exposed.
    pub async fn list_for_owner(&self, username: &str) -> DbResult<Vec<DbBudgetWithOwner>> {
        let budgets = sqlx::query_as::<_, DbBudgetWithOwner>(
            r#"
            SELECT
                b.id, b.user_id, u.username AS owner_username,
                b.name, b.total_budget, b.created_at
            FROM budgets b
            JOIN users u ON u.id = b.user_id
            WHERE u.username = $1
            ORDER BY b.created_at
            "#,
        )
        .bind(username)
        .fetch_all(&self.pool)
        .await?;

        Ok(budgets)
    }

    /// Find a budget by ID, with its owner's username
    pub async fn find_by_id(&self, id: Uuid) -> DbResult<Option<DbBudgetWithOwner>> {
        let budget = sqlx::query_as::<_, DbBudgetWithOwner>(
            r#"
            SELECT
                b.id, b.user_id, u.username AS owner_username,
                b.name, b.total_budget, b.created_at
            FROM budgets b
            JOIN users u ON u.id = b.user_id
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(budget)
    }
}
