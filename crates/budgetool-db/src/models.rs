//! Database models - mapped from PostgreSQL tables

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ============================================================================
// User Models
// ============================================================================

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Budget Models
// ============================================================================

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbBudget {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub total_budget: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Budget row joined with the owning user's username.
///
/// The read view labels every budget with its owner, so list and detail
/// queries fetch the join in one round trip.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbBudgetWithOwner {
    pub id: Uuid,
    pub user_id: Uuid,
    pub owner_username: String,
    pub name: String,
    pub total_budget: Decimal,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Transaction Models
// ============================================================================

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct DbTransaction {
    pub id: Uuid,
    pub budget_id: Uuid,
    pub user_id: Uuid,
    pub type_of: String,
    pub amount: Decimal,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
