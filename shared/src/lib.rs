//! Wire-level DTOs shared between the expense tracker backend and its clients.
//!
//! Everything here serializes as camelCase JSON, matching the wire format the
//! original API consumers already speak. Nullable money amounts coming out of
//! the store are coerced to `0.0` before they reach these types; nullable
//! dates stay `null`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Categories & budgets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: i64,
    pub name: String,
}

/// Body of `POST /api/categories`. A budget row is only created when
/// `budget1 > 0` and `interval` is non-empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    pub name: String,
    /// Initial budget ceiling; "budget1" is the field name the original
    /// schema exposed and existing clients still send.
    #[serde(default, rename = "budget1")]
    pub budget: Option<f64>,
    #[serde(default)]
    pub interval: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of `PUT /api/categories/category/{categoryId}`. Overwrites the
/// category's budget (or creates one if the category has none).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBudgetRequest {
    #[serde(default, rename = "budget1")]
    pub budget: Option<f64>,
    pub interval: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Expenses and income sources of one category, joined with their line items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBreakdownResponse {
    pub expenses: Vec<ExpenseDto>,
    pub income_sources: Vec<IncomeSourceDto>,
}

// ---------------------------------------------------------------------------
// Expenses
// ---------------------------------------------------------------------------

/// A single dated, amounted expense line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDetailDto {
    pub amount: f64,
    pub date: Option<NaiveDate>,
}

/// An expense with all of its detail lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDto {
    pub id: i64,
    pub description: String,
    pub category_id: i64,
    pub expense_details: Vec<ExpenseDetailDto>,
}

/// Incoming detail line; a missing amount is treated as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseDetailPayload {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Body of `POST /api/expense/AddOrCreateExpense`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    pub description: String,
    pub category_id: i64,
    #[serde(default)]
    pub expense_details: Vec<ExpenseDetailPayload>,
}

/// Body of `PUT /api/expense/{id}`: replaces the description and the entire
/// detail collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpenseRequest {
    pub description: String,
    #[serde(default)]
    pub expense_details: Vec<ExpenseDetailPayload>,
}

/// Bare expense row, as returned by list/search/filter scans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummaryDto {
    pub id: i64,
    pub description: Option<String>,
    pub category_id: Option<i64>,
}

/// One row of the denormalized expense/category view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryViewRowDto {
    pub expense_detail_id: i64,
    pub detail_expense_id: Option<i64>,
    pub expense_detail_amount: f64,
    pub expense_detail_date: Option<NaiveDate>,
    pub expense_id: i64,
    pub expense_description: Option<String>,
    pub category_id: i64,
    pub category_name: String,
}

// ---------------------------------------------------------------------------
// Income sources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeEntryDto {
    pub amount: f64,
    pub date: Option<NaiveDate>,
}

/// Incoming income entry; dates must fall within the store's supported range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeEntryPayload {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// An income source with all of its entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeSourceDto {
    pub id: i64,
    pub description: Option<String>,
    pub category_id: i64,
    pub income_entries: Vec<IncomeEntryDto>,
}

/// Body of `POST /api/IncomeSource/income-sources`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIncomeSourceRequest {
    pub description: String,
    pub category_id: i64,
    #[serde(default)]
    pub income_entries: Vec<IncomeEntryPayload>,
}

/// Body of `PUT /api/IncomeSource/income-sources/{id}`: replaces the
/// description, the category link, and the entire entry collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIncomeSourceRequest {
    pub description: String,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub income_entries: Vec<IncomeEntryPayload>,
}

/// Bare income source row, as returned by get/search/filter scans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeSourceSummaryDto {
    pub id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub amount: f64,
    pub date: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNameQuery {
    pub category_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

/// `GET /api/expense/filter?category=&startDate=&endDate=`. The date range is
/// inclusive; `category` narrows the scan when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseFilterQuery {
    #[serde(default)]
    pub category: Option<i64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// `GET /api/IncomeSource/filter?startDate=&endDate=`, inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeFilterQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
