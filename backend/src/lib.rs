//! Expense tracker backend: storage, domain services, and the REST surface.
//!
//! [`initialize_backend`] wires the layers together; [`create_router`] turns
//! the resulting [`AppState`] into an axum router that `main` serves.

pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::domain::{CategoryService, ExpenseService, IncomeService};
use crate::io::rest::{category_apis, expense_apis, income_apis};
use crate::storage::DbConnection;

/// Shared handler state: one service per aggregate, all cloning the same
/// connection pool.
#[derive(Clone)]
pub struct AppState {
    pub category_service: CategoryService,
    pub expense_service: ExpenseService,
    pub income_service: IncomeService,
}

/// Connect to the database, run schema setup, and build the service layer.
pub async fn initialize_backend(database_url: &str) -> Result<AppState> {
    info!("Initializing backend with database {}", database_url);
    let db = DbConnection::new(database_url).await?;

    Ok(AppState {
        category_service: CategoryService::new(db.clone()),
        expense_service: ExpenseService::new(db.clone()),
        income_service: IncomeService::new(db),
    })
}

/// Build the full API router. Paths keep the casing the original consumers
/// already call, irregular as it is.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Categories
        .route(
            "/categories",
            get(category_apis::list_categories).post(category_apis::create_category),
        )
        .route(
            "/categories/categoryName",
            get(category_apis::get_category_breakdown),
        )
        .route(
            "/categories/category/:category_id",
            put(category_apis::update_category_budget).delete(category_apis::delete_category),
        )
        // Expenses
        .route(
            "/expense/AddOrCreateExpense",
            post(expense_apis::add_or_create_expense),
        )
        .route(
            "/expense/GetExpensesAndDetailsByCategoryName",
            get(expense_apis::get_expenses_by_category_name),
        )
        .route(
            "/expense/GetViewStatement/:category_name",
            get(expense_apis::get_view_statement),
        )
        .route("/expense/GetExpenses", get(expense_apis::get_expenses))
        .route("/expense/search", get(expense_apis::search_expenses))
        .route("/expense/filter", get(expense_apis::filter_expenses))
        .route(
            "/expense/:id",
            get(expense_apis::get_expense).put(expense_apis::update_expense),
        )
        .route("/expense/expense/:id", delete(expense_apis::delete_expense))
        // Income sources
        .route(
            "/IncomeSource/income-sources",
            post(income_apis::add_or_create_income_source),
        )
        .route(
            "/IncomeSource/income-sources/:id",
            put(income_apis::update_income_source),
        )
        .route(
            "/IncomeSource/incomeSource/:id",
            delete(income_apis::delete_income_source),
        )
        .route(
            "/IncomeSource/GetIncomeSourcesByCategory/:category_name",
            get(income_apis::get_income_sources_by_category),
        )
        .route("/IncomeSource/search", get(income_apis::search_income_sources))
        .route("/IncomeSource/filter", get(income_apis::filter_income_sources))
        .route("/IncomeSource/:id", get(income_apis::get_income_source));

    Router::new().nest("/api", api).layer(cors).with_state(state)
}
