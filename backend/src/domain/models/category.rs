use sqlx::FromRow;

use super::expense::ExpenseWithDetails;
use super::income::IncomeSourceWithEntries;

/// Named grouping for expenses, budgets, and income sources.
#[derive(FromRow, Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Spending ceiling with a recurrence interval, attached to a category.
/// The amount is nullable: a budget row without a ceiling never rejects
/// anything.
#[derive(FromRow, Debug, Clone, PartialEq)]
pub struct Budget {
    pub id: i64,
    pub category_id: Option<i64>,
    pub amount: Option<f64>,
    pub interval: String,
    pub description: Option<String>,
}

/// Everything recorded under one category, joined with line items.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryBreakdown {
    pub expenses: Vec<ExpenseWithDetails>,
    pub income_sources: Vec<IncomeSourceWithEntries>,
}
