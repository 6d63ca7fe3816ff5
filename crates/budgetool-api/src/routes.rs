//! Route definitions

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers;
use crate::pages;
use crate::state::AppState;

/// JSON routes mounted under /api/v1
pub fn api_v1_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Auth
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        // Users
        .route("/users", post(handlers::user::create_user))
        .route("/users/:id", get(handlers::user::get_user))
        // Budgets
        .route(
            "/budgets",
            get(handlers::budget::list_budgets).post(handlers::budget::create_budget),
        )
        .route("/budgets/:id", get(handlers::budget::get_budget))
        // Transactions
        .route(
            "/budgets/:id/transactions",
            get(handlers::transaction::list_transactions)
                .post(handlers::transaction::create_transaction),
        )
}

/// Server-rendered page routes mounted at the root
pub fn page_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(|| async { axum::response::Redirect::to("/budgets") }))
        .route("/login", get(pages::login_page).post(pages::login_submit))
        .route("/logout", get(pages::logout_page).post(pages::logout_page))
        .route("/budgets", get(pages::budget_list_page))
        .route(
            "/budgets/new",
            get(pages::budget_new_page).post(pages::budget_create_submit),
        )
        .route("/budgets/:id", get(pages::budget_detail_page))
        .route(
            "/budgets/:id/transactions/new",
            get(pages::transaction_new_page).post(pages::transaction_create_submit),
        )
}
