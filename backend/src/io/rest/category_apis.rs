use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tracing::info;

use crate::io::rest::mappers::category_mapper;
use crate::io::rest::error_response;
use crate::AppState;
use shared::{CategoryNameQuery, CreateCategoryRequest, UpdateBudgetRequest};

/// GET /api/categories
pub async fn list_categories(State(state): State<AppState>) -> impl IntoResponse {
    match state.category_service.list().await {
        Ok(categories) => {
            let dtos: Vec<_> = categories.into_iter().map(category_mapper::to_dto).collect();
            Json(dtos).into_response()
        }
        Err(err) => error_response(err),
    }
}

/// POST /api/categories
pub async fn create_category(
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> impl IntoResponse {
    info!("POST /categories: {}", request.name);
    match state.category_service.create(request).await {
        Ok(category) => Json(json!({
            "message": "Category created successfully.",
            "category": category_mapper::to_dto(category),
        }))
        .into_response(),
        Err(err) => error_response(err),
    }
}

/// GET /api/categories/categoryName?categoryName={name}
///
/// An unknown name answers 200 with an empty breakdown, not 404.
pub async fn get_category_breakdown(
    State(state): State<AppState>,
    Query(query): Query<CategoryNameQuery>,
) -> impl IntoResponse {
    match state
        .category_service
        .breakdown_by_name(&query.category_name)
        .await
    {
        Ok(breakdown) => Json(category_mapper::breakdown_to_response(breakdown)).into_response(),
        Err(err) => error_response(err),
    }
}

/// PUT /api/categories/category/{category_id}
pub async fn update_category_budget(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
    Json(request): Json<UpdateBudgetRequest>,
) -> impl IntoResponse {
    match state
        .category_service
        .update_budget(category_id, request)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

/// DELETE /api/categories/category/{category_id}
pub async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> impl IntoResponse {
    match state.category_service.delete(category_id).await {
        Ok(()) => Json(json!({ "message": "Category deleted successfully." })).into_response(),
        Err(err) => error_response(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CategoryService, ExpenseService, IncomeService};
    use crate::storage::DbConnection;

    async fn setup_state() -> AppState {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        AppState {
            category_service: CategoryService::new(db.clone()),
            expense_service: ExpenseService::new(db.clone()),
            income_service: IncomeService::new(db),
        }
    }

    #[tokio::test]
    async fn test_create_category_answers_ok() {
        let state = setup_state().await;

        let response = create_category(
            State(state),
            Json(CreateCategoryRequest {
                name: "Food".to_string(),
                budget: None,
                interval: None,
                description: None,
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_category_empty_name_answers_bad_request() {
        let state = setup_state().await;

        let response = create_category(
            State(state),
            Json(CreateCategoryRequest {
                name: "  ".to_string(),
                budget: None,
                interval: None,
                description: None,
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
