use chrono::NaiveDate;
use sqlx::FromRow;

/// A logical expense. The description doubles as the natural de-dup key
/// within a category: posting the same description again appends detail
/// lines instead of creating a second row.
#[derive(FromRow, Debug, Clone, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub description: Option<String>,
    pub category_id: Option<i64>,
}

/// A dated, amounted line item belonging to an expense.
#[derive(FromRow, Debug, Clone, PartialEq)]
pub struct ExpenseDetail {
    pub id: i64,
    pub expense_id: Option<i64>,
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseWithDetails {
    pub expense: Expense,
    pub details: Vec<ExpenseDetail>,
}

/// One row of the `expense_category_view` reporting view. Produced by the
/// store, never written.
#[derive(FromRow, Debug, Clone, PartialEq)]
pub struct ExpenseCategoryViewRow {
    pub expense_detail_id: i64,
    pub detail_expense_id: Option<i64>,
    pub expense_detail_amount: Option<f64>,
    pub expense_detail_date: Option<NaiveDate>,
    pub expense_id: i64,
    pub expense_description: Option<String>,
    pub category_id: i64,
    pub category_name: String,
}
