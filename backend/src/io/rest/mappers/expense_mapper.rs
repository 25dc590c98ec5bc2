use crate::domain::models::{Expense, ExpenseCategoryViewRow, ExpenseWithDetails};
use shared::{CategoryViewRowDto, ExpenseDetailDto, ExpenseDto, ExpenseSummaryDto};

/// Nullable store columns are coerced to wire defaults here: missing
/// descriptions become empty strings, missing amounts and category links
/// become zero. Dates stay nullable on the wire.
pub fn to_dto(expense: ExpenseWithDetails) -> ExpenseDto {
    ExpenseDto {
        id: expense.expense.id,
        description: expense.expense.description.unwrap_or_default(),
        category_id: expense.expense.category_id.unwrap_or_default(),
        expense_details: expense
            .details
            .into_iter()
            .map(|detail| ExpenseDetailDto {
                amount: detail.amount.unwrap_or(0.0),
                date: detail.date,
            })
            .collect(),
    }
}

pub fn to_summary_dto(expense: Expense) -> ExpenseSummaryDto {
    ExpenseSummaryDto {
        id: expense.id,
        description: expense.description,
        category_id: expense.category_id,
    }
}

pub fn view_row_to_dto(row: ExpenseCategoryViewRow) -> CategoryViewRowDto {
    CategoryViewRowDto {
        expense_detail_id: row.expense_detail_id,
        detail_expense_id: row.detail_expense_id,
        expense_detail_amount: row.expense_detail_amount.unwrap_or(0.0),
        expense_detail_date: row.expense_detail_date,
        expense_id: row.expense_id,
        expense_description: row.expense_description,
        category_id: row.category_id,
        category_name: row.category_name,
    }
}
