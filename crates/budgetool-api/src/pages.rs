//! Server-rendered pages
//!
//! The browser surface: login form plus budget list/detail/create and
//! transaction create. Pages are login-gated through [`RequireUserPage`],
//! which redirects anonymous visitors to /login. Form posts answer with
//! a redirect so refreshing never resubmits.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::extractors::{OptionalUser, RequireUserPage};
use crate::handlers::auth::{clear_session_cookie, session_cookie};
use crate::middleware::extract_session_token;
use crate::state::AppState;
use budgetool_db::{DbBudgetWithOwner, DbTransaction};

// =============================================================================
// Forms
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct BudgetForm {
    pub name: String,
    pub total_budget: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    pub type_of: String,
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
}

// =============================================================================
// Login / Logout
// =============================================================================

/// GET /login - render the login form.
///
/// Already-logged-in visitors go straight to their budget list.
pub async fn login_page(OptionalUser(user): OptionalUser) -> Response {
    if user.is_some() {
        return Redirect::to("/budgets").into_response();
    }
    Html(render_login_page(None)).into_response()
}

/// POST /login - verify credentials and redirect to the budget list.
///
/// A failed login re-renders the form with an error instead of
/// answering with JSON.
pub async fn login_submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> ApiResult<Response> {
    match state.auth.log_in(&form.username, &form.password).await {
        Ok((_user, token)) => Ok((
            [(header::SET_COOKIE, session_cookie(&token))],
            Redirect::to("/budgets"),
        )
            .into_response()),
        Err(budgetool_auth::AuthError::InvalidCredentials) => Ok((
            StatusCode::UNAUTHORIZED,
            Html(render_login_page(Some("Invalid username or password."))),
        )
            .into_response()),
        Err(e) => Err(ApiError::from(e)),
    }
}

/// GET /logout - close the session and return to the login page
pub async fn logout_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    if let Some(token) = extract_session_token(&headers) {
        state.auth.sessions.log_out(&token).await?;
    }

    Ok((
        [(header::SET_COOKIE, clear_session_cookie())],
        Redirect::to("/login"),
    )
        .into_response())
}

// =============================================================================
// Budget pages
// =============================================================================

/// GET /budgets - the caller's budget list
pub async fn budget_list_page(
    RequireUserPage(user): RequireUserPage,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Html<String>> {
    let budgets = state
        .db
        .budget_repo()
        .list_for_owner(&user.username)
        .await?;

    Ok(Html(render_budget_list(&user.username, &budgets)))
}

/// GET /budgets/new - budget creation form
pub async fn budget_new_page(RequireUserPage(user): RequireUserPage) -> Html<String> {
    Html(render_budget_form(&user.username, None))
}

/// POST /budgets/new - create a budget and return to the list.
///
/// Validation failures re-render the form with an inline error; a
/// browser never sees a JSON body here.
pub async fn budget_create_submit(
    RequireUserPage(user): RequireUserPage,
    State(state): State<Arc<AppState>>,
    Form(form): Form<BudgetForm>,
) -> ApiResult<Response> {
    if form.name.trim().is_empty() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Html(render_budget_form(&user.username, Some("Name must not be empty."))),
        )
            .into_response());
    }

    state
        .db
        .budget_repo()
        .create(user.id, &form.name, form.total_budget)
        .await?;

    Ok(Redirect::to("/budgets").into_response())
}

/// GET /budgets/:id - budget detail with its transactions
pub async fn budget_detail_page(
    RequireUserPage(_user): RequireUserPage,
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    let budget = match state.db.budget_repo().find_by_id(id).await? {
        Some(budget) => budget,
        None => return Ok(not_found_page()),
    };

    let transactions = state.db.transaction_repo().list_for_budget(id).await?;

    Ok(Html(render_budget_detail(&budget, &transactions)).into_response())
}

// =============================================================================
// Transaction pages
// =============================================================================

/// GET /budgets/:id/transactions/new - transaction creation form
pub async fn transaction_new_page(
    RequireUserPage(_user): RequireUserPage,
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    let budget = match state.db.budget_repo().find_by_id(id).await? {
        Some(budget) => budget,
        None => return Ok(not_found_page()),
    };

    Ok(Html(render_transaction_form(&budget, None)).into_response())
}

/// POST /budgets/:id/transactions/new - record a transaction and return
/// to the budget detail page.
///
/// Validation failures re-render the form with an inline error.
pub async fn transaction_create_submit(
    RequireUserPage(user): RequireUserPage,
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Form(form): Form<TransactionForm>,
) -> ApiResult<Response> {
    let budget = match state.db.budget_repo().find_by_id(id).await? {
        Some(budget) => budget,
        None => return Ok(not_found_page()),
    };

    if form.type_of.trim().is_empty() {
        return Ok((
            StatusCode::BAD_REQUEST,
            Html(render_transaction_form(&budget, Some("Type must not be empty."))),
        )
            .into_response());
    }

    state
        .db
        .transaction_repo()
        .create(id, user.id, &form.type_of, form.amount, &form.description)
        .await?;

    Ok(Redirect::to(&format!("/budgets/{}", id)).into_response())
}

// =============================================================================
// Rendering
// =============================================================================

/// Wrap page content in the shared layout
fn page_layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Budgetool</title>
    <style>
        body {{ font-family: -apple-system, sans-serif; max-width: 720px; margin: 2rem auto; padding: 0 1rem; color: #1a202c; }}
        h1 {{ font-size: 1.5rem; }}
        table {{ width: 100%; border-collapse: collapse; margin: 1rem 0; }}
        th, td {{ text-align: left; padding: 0.5rem; border-bottom: 1px solid #e2e8f0; }}
        form {{ margin: 1rem 0; }}
        label {{ display: block; margin: 0.5rem 0 0.25rem; }}
        input {{ padding: 0.4rem; width: 100%; max-width: 20rem; }}
        button {{ margin-top: 1rem; padding: 0.5rem 1rem; }}
        nav {{ margin-bottom: 1.5rem; }}
        nav a {{ margin-right: 1rem; }}
        .error {{ color: #c53030; }}
    </style>
</head>
<body>
{body}
</body>
</html>"#,
        title = escape_html(title),
        body = body,
    )
}

fn render_login_page(error: Option<&str>) -> String {
    let body = format!(
        r#"<h1>Log in</h1>
{error_html}<form method="post" action="/login">
    <label for="username">Username</label>
    <input type="text" id="username" name="username" required>
    <label for="password">Password</label>
    <input type="password" id="password" name="password" required>
    <button type="submit">Log in</button>
</form>"#,
        error_html = render_error(error),
    );

    page_layout("Log in", &body)
}

fn render_nav(username: &str) -> String {
    format!(
        r#"<nav>
    <a href="/budgets">Budgets</a>
    <a href="/budgets/new">New budget</a>
    <span>{} | <a href="/logout">Log out</a></span>
</nav>"#,
        escape_html(username),
    )
}

fn render_budget_list(username: &str, budgets: &[DbBudgetWithOwner]) -> String {
    let rows: String = budgets
        .iter()
        .map(|b| {
            format!(
                "<tr><td><a href=\"/budgets/{id}\">{name}</a></td><td>{total}</td></tr>\n",
                id = b.id,
                name = escape_html(&b.name),
                total = b.total_budget,
            )
        })
        .collect();

    let table = if budgets.is_empty() {
        "<p>No budgets yet. <a href=\"/budgets/new\">Create one</a>.</p>".to_string()
    } else {
        format!(
            "<table>\n<tr><th>Name</th><th>Total</th></tr>\n{}</table>",
            rows
        )
    };

    let body = format!("{}<h1>Your budgets</h1>\n{}", render_nav(username), table);
    page_layout("Budgets", &body)
}

fn render_error(error: Option<&str>) -> String {
    match error {
        Some(msg) => format!("<p class=\"error\">{}</p>\n", escape_html(msg)),
        None => String::new(),
    }
}

fn render_budget_form(username: &str, error: Option<&str>) -> String {
    let body = format!(
        r#"{nav}<h1>New budget</h1>
{error_html}<form method="post" action="/budgets/new">
    <label for="name">Name</label>
    <input type="text" id="name" name="name" required>
    <label for="total_budget">Total budget</label>
    <input type="number" id="total_budget" name="total_budget" step="0.01" required>
    <button type="submit">Create</button>
</form>"#,
        nav = render_nav(username),
        error_html = render_error(error),
    );

    page_layout("New budget", &body)
}

fn render_budget_detail(budget: &DbBudgetWithOwner, transactions: &[DbTransaction]) -> String {
    let rows: String = transactions
        .iter()
        .map(|t| {
            format!(
                "<tr><td>{type_of}</td><td>{amount}</td><td>{description}</td></tr>\n",
                type_of = escape_html(&t.type_of),
                amount = t.amount,
                description = escape_html(&t.description),
            )
        })
        .collect();

    let table = if transactions.is_empty() {
        "<p>No transactions yet.</p>".to_string()
    } else {
        format!(
            "<table>\n<tr><th>Type</th><th>Amount</th><th>Description</th></tr>\n{}</table>",
            rows
        )
    };

    let body = format!(
        r#"{nav}<h1>{name}</h1>
<p>Owner: {owner} | Total budget: {total}</p>
<p><a href="/budgets/{id}/transactions/new">Add transaction</a></p>
{table}"#,
        nav = render_nav(&budget.owner_username),
        name = escape_html(&budget.name),
        owner = escape_html(&budget.owner_username),
        total = budget.total_budget,
        id = budget.id,
        table = table,
    );

    page_layout(&budget.name, &body)
}

fn render_transaction_form(budget: &DbBudgetWithOwner, error: Option<&str>) -> String {
    let body = format!(
        r#"{nav}<h1>Add transaction to {name}</h1>
{error_html}<form method="post" action="/budgets/{id}/transactions/new">
    <label for="type_of">Type</label>
    <input type="text" id="type_of" name="type_of" required>
    <label for="amount">Amount</label>
    <input type="number" id="amount" name="amount" step="0.01" required>
    <label for="description">Description</label>
    <input type="text" id="description" name="description">
    <button type="submit">Add</button>
</form>"#,
        nav = render_nav(&budget.owner_username),
        name = escape_html(&budget.name),
        id = budget.id,
        error_html = render_error(error),
    );

    page_layout("Add transaction", &body)
}

fn not_found_page() -> Response {
    let body = "<h1>Not found</h1>\n<p><a href=\"/budgets\">Back to budgets</a></p>";
    (StatusCode::NOT_FOUND, Html(page_layout("Not found", body))).into_response()
}

/// Escape user-supplied text for inclusion in HTML
fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn sample_budget() -> DbBudgetWithOwner {
        DbBudgetWithOwner {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            owner_username: "alice".to_string(),
            name: "Groceries".to_string(),
            total_budget: dec!(250.00),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_login_page_renders_error() {
        let html = render_login_page(Some("Invalid username or password."));
        assert!(html.contains("Invalid username or password."));
        assert!(html.contains("form method=\"post\" action=\"/login\""));
    }

    #[test]
    fn test_budget_list_escapes_names() {
        let mut budget = sample_budget();
        budget.name = "<b>bold</b>".to_string();

        let html = render_budget_list("alice", &[budget]);
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!html.contains("<b>bold</b>"));
    }

    #[test]
    fn test_budget_detail_links_transaction_form() {
        let budget = sample_budget();
        let html = render_budget_detail(&budget, &[]);

        assert!(html.contains(&format!("/budgets/{}/transactions/new", budget.id)));
        assert!(html.contains("No transactions yet."));
    }

    #[test]
    fn test_empty_budget_list_offers_create_link() {
        let html = render_budget_list("alice", &[]);
        assert!(html.contains("/budgets/new"));
    }

    #[test]
    fn test_budget_form_renders_inline_error() {
        let html = render_budget_form("alice", Some("Name must not be empty."));
        assert!(html.contains("class=\"error\""));
        assert!(html.contains("Name must not be empty."));
        // The form stays on the page so the user can correct the input
        assert!(html.contains("action=\"/budgets/new\""));

        let clean = render_budget_form("alice", None);
        assert!(!clean.contains("class=\"error\""));
    }

    #[test]
    fn test_transaction_form_renders_inline_error() {
        let budget = sample_budget();
        let html = render_transaction_form(&budget, Some("Type must not be empty."));

        assert!(html.contains("class=\"error\""));
        assert!(html.contains("Type must not be empty."));
        assert!(html.contains(&format!("action=\"/budgets/{}/transactions/new\"", budget.id)));
    }
}
