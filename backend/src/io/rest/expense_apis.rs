use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tracing::info;

use crate::domain::models::CreateOrAppendOutcome;
use crate::io::rest::mappers::expense_mapper;
use crate::io::rest::error_response;
use crate::AppState;
use shared::{
    CategoryNameQuery, CreateExpenseRequest, ExpenseFilterQuery, SearchQuery, UpdateExpenseRequest,
};

/// POST /api/expense/AddOrCreateExpense
///
/// Creates the expense when the description is new to the category, appends
/// detail lines to the existing one otherwise. Both answer 200; the body's
/// message tells them apart.
pub async fn add_or_create_expense(
    State(state): State<AppState>,
    Json(request): Json<CreateExpenseRequest>,
) -> impl IntoResponse {
    info!("POST /expense/AddOrCreateExpense: {}", request.description);
    match state.expense_service.create_or_append(request).await {
        Ok(CreateOrAppendOutcome::Created { id }) => Json(json!({
            "message": "Expense created and details added successfully.",
            "id": id,
        }))
        .into_response(),
        Ok(CreateOrAppendOutcome::Appended { id }) => Json(json!({
            "message": "Expense details added to existing expense successfully.",
            "id": id,
        }))
        .into_response(),
        Err(err) => error_response(err),
    }
}

/// GET /api/expense/GetExpensesAndDetailsByCategoryName?categoryName={name}
pub async fn get_expenses_by_category_name(
    State(state): State<AppState>,
    Query(query): Query<CategoryNameQuery>,
) -> impl IntoResponse {
    match state
        .expense_service
        .get_by_category_name(&query.category_name)
        .await
    {
        Ok(expenses) => {
            let dtos: Vec<_> = expenses.into_iter().map(expense_mapper::to_dto).collect();
            Json(dtos).into_response()
        }
        Err(err) => error_response(err),
    }
}

/// GET /api/expense/GetViewStatement/{category_name}
pub async fn get_view_statement(
    State(state): State<AppState>,
    Path(category_name): Path<String>,
) -> impl IntoResponse {
    match state.expense_service.category_view(&category_name).await {
        Ok(rows) => {
            let dtos: Vec<_> = rows.into_iter().map(expense_mapper::view_row_to_dto).collect();
            Json(dtos).into_response()
        }
        Err(err) => error_response(err),
    }
}

/// GET /api/expense/GetExpenses
pub async fn get_expenses(State(state): State<AppState>) -> impl IntoResponse {
    match state.expense_service.list().await {
        Ok(expenses) => {
            let dtos: Vec<_> = expenses
                .into_iter()
                .map(expense_mapper::to_summary_dto)
                .collect();
            Json(dtos).into_response()
        }
        Err(err) => error_response(err),
    }
}

/// GET /api/expense/search?query={text}
pub async fn search_expenses(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    match state.expense_service.search(&query.query).await {
        Ok(expenses) => {
            let dtos: Vec<_> = expenses
                .into_iter()
                .map(expense_mapper::to_summary_dto)
                .collect();
            Json(dtos).into_response()
        }
        Err(err) => error_response(err),
    }
}

/// GET /api/expense/filter?category={id}&startDate={date}&endDate={date}
pub async fn filter_expenses(
    State(state): State<AppState>,
    Query(query): Query<ExpenseFilterQuery>,
) -> impl IntoResponse {
    match state
        .expense_service
        .filter_by_date_range(query.category, query.start_date, query.end_date)
        .await
    {
        Ok(expenses) => {
            let dtos: Vec<_> = expenses
                .into_iter()
                .map(expense_mapper::to_summary_dto)
                .collect();
            Json(dtos).into_response()
        }
        Err(err) => error_response(err),
    }
}

/// GET /api/expense/{id}
pub async fn get_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match state.expense_service.get_by_id(id).await {
        Ok(Some(expense)) => Json(expense_mapper::to_dto(expense)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Expense not found." })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

/// PUT /api/expense/{id}
pub async fn update_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateExpenseRequest>,
) -> impl IntoResponse {
    match state.expense_service.update(id, request).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

/// DELETE /api/expense/expense/{id}
pub async fn delete_expense(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match state.expense_service.delete(id).await {
        Ok(()) => Json(json!({ "message": "Expense deleted successfully." })).into_response(),
        Err(err) => error_response(err),
    }
}
