use crate::domain::models::{Category, CategoryBreakdown};
use crate::io::rest::mappers::{expense_mapper, income_mapper};
use shared::{CategoryBreakdownResponse, CategoryDto};

pub fn to_dto(category: Category) -> CategoryDto {
    CategoryDto {
        id: category.id,
        name: category.name,
    }
}

pub fn breakdown_to_response(breakdown: CategoryBreakdown) -> CategoryBreakdownResponse {
    CategoryBreakdownResponse {
        expenses: breakdown
            .expenses
            .into_iter()
            .map(expense_mapper::to_dto)
            .collect(),
        income_sources: breakdown
            .income_sources
            .into_iter()
            .map(income_mapper::to_dto)
            .collect(),
    }
}
