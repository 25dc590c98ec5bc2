use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tracing::info;

use crate::domain::models::CreateOrAppendOutcome;
use crate::io::rest::mappers::income_mapper;
use crate::io::rest::error_response;
use crate::AppState;
use shared::{
    CreateIncomeSourceRequest, IncomeFilterQuery, SearchQuery, UpdateIncomeSourceRequest,
};

/// POST /api/IncomeSource/income-sources
///
/// Creates the income source when the (description, category) pair is new,
/// appends entries to the existing one otherwise. Both answer 200; the
/// body's message tells them apart.
pub async fn add_or_create_income_source(
    State(state): State<AppState>,
    Json(request): Json<CreateIncomeSourceRequest>,
) -> impl IntoResponse {
    info!("POST /IncomeSource/income-sources: {}", request.description);
    match state.income_service.create_or_append(request).await {
        Ok(CreateOrAppendOutcome::Created { id }) => Json(json!({
            "message": "Income source created and entries added successfully.",
            "id": id,
        }))
        .into_response(),
        Ok(CreateOrAppendOutcome::Appended { id }) => Json(json!({
            "message": "Income entries added to existing income source successfully.",
            "id": id,
        }))
        .into_response(),
        Err(err) => error_response(err),
    }
}

/// GET /api/IncomeSource/GetIncomeSourcesByCategory/{category_name}
pub async fn get_income_sources_by_category(
    State(state): State<AppState>,
    Path(category_name): Path<String>,
) -> impl IntoResponse {
    match state
        .income_service
        .get_by_category_name(&category_name)
        .await
    {
        Ok(sources) => {
            let dtos: Vec<_> = sources.into_iter().map(income_mapper::to_dto).collect();
            Json(dtos).into_response()
        }
        Err(err) => error_response(err),
    }
}

/// GET /api/IncomeSource/search?query={text}
pub async fn search_income_sources(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    match state.income_service.search(&query.query).await {
        Ok(sources) => {
            let dtos: Vec<_> = sources
                .into_iter()
                .map(income_mapper::to_summary_dto)
                .collect();
            Json(dtos).into_response()
        }
        Err(err) => error_response(err),
    }
}

/// GET /api/IncomeSource/filter?startDate={date}&endDate={date}
pub async fn filter_income_sources(
    State(state): State<AppState>,
    Query(query): Query<IncomeFilterQuery>,
) -> impl IntoResponse {
    match state
        .income_service
        .filter_by_date_range(query.start_date, query.end_date)
        .await
    {
        Ok(sources) => {
            let dtos: Vec<_> = sources
                .into_iter()
                .map(income_mapper::to_summary_dto)
                .collect();
            Json(dtos).into_response()
        }
        Err(err) => error_response(err),
    }
}

/// GET /api/IncomeSource/{id}
pub async fn get_income_source(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match state.income_service.get_by_id(id).await {
        Ok(Some(source)) => Json(income_mapper::to_dto(source)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Income source not found." })),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}

/// PUT /api/IncomeSource/income-sources/{id}
pub async fn update_income_source(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateIncomeSourceRequest>,
) -> impl IntoResponse {
    match state.income_service.update(id, request).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

/// DELETE /api/IncomeSource/incomeSource/{id}
pub async fn delete_income_source(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match state.income_service.delete(id).await {
        Ok(()) => Json(json!({ "message": "Income source deleted successfully." })).into_response(),
        Err(err) => error_response(err),
    }
}
