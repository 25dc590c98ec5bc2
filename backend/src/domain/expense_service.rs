use chrono::NaiveDate;
use tracing::{info, warn};

use crate::domain::errors::{ServiceError, ServiceResult};
use crate::domain::models::{
    CreateOrAppendOutcome, Expense, ExpenseCategoryViewRow, ExpenseWithDetails,
};
use crate::storage::{BudgetRepository, CategoryRepository, DbConnection, ExpenseRepository};
use shared::{CreateExpenseRequest, UpdateExpenseRequest};

/// Service for recording and querying expenses.
///
/// The central operation is [`create_or_append`](Self::create_or_append):
/// posting detail lines under a description that already exists in the
/// category appends to that expense, otherwise a new expense is created and
/// the category's budget decremented. The budget check and the writes run in
/// a single transaction so a concurrent post cannot slip past the ceiling.
#[derive(Clone)]
pub struct ExpenseService {
    db: DbConnection,
    categories: CategoryRepository,
    budgets: BudgetRepository,
    expenses: ExpenseRepository,
}

impl ExpenseService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            categories: CategoryRepository::new(db.clone()),
            budgets: BudgetRepository::new(),
            expenses: ExpenseRepository::new(db.clone()),
            db,
        }
    }

    /// Record the submitted detail lines, creating the expense when the
    /// description is new to the category and appending to it otherwise.
    ///
    /// Every budget of the category with a non-null ceiling is checked
    /// against the projected category total (existing details plus the
    /// incoming batch); any ceiling exceeded rejects the whole batch and
    /// leaves storage untouched. Only the create branch decrements the
    /// budget, by the sum of the new lines.
    pub async fn create_or_append(
        &self,
        request: CreateExpenseRequest,
    ) -> ServiceResult<CreateOrAppendOutcome> {
        info!(
            "Recording expense '{}' in category {}",
            request.description, request.category_id
        );

        let mut tx = self.db.pool().begin().await?;

        if self
            .categories
            .find_by_id(&mut tx, request.category_id)
            .await?
            .is_none()
        {
            warn!("Category {} not found", request.category_id);
            return Err(ServiceError::CategoryNotFound);
        }

        let current_total = self
            .expenses
            .category_detail_total(&mut tx, request.category_id)
            .await?;
        let batch_total: f64 = request
            .expense_details
            .iter()
            .map(|d| d.amount.unwrap_or(0.0))
            .sum();
        let projected = current_total + batch_total;

        for budget in self
            .budgets
            .list_for_category(&mut tx, request.category_id)
            .await?
        {
            if let Some(limit) = budget.amount {
                if projected > limit {
                    warn!(
                        "Rejecting expense '{}': projected total {} exceeds budget {} ({})",
                        request.description, projected, budget.id, limit
                    );
                    return Err(ServiceError::BudgetExceeded);
                }
            }
        }

        let outcome = match self
            .expenses
            .find_in_category_by_description(&mut tx, request.category_id, &request.description)
            .await?
        {
            None => {
                let expense_id = self
                    .expenses
                    .insert(&mut tx, request.category_id, &request.description)
                    .await?;
                for detail in &request.expense_details {
                    self.expenses
                        .insert_detail(&mut tx, expense_id, detail.amount, detail.date)
                        .await?;
                }
                self.budgets
                    .decrement_first(&mut tx, request.category_id, batch_total)
                    .await?;
                CreateOrAppendOutcome::Created { id: expense_id }
            }
            Some(existing) => {
                for detail in &request.expense_details {
                    self.expenses
                        .insert_detail(&mut tx, existing.id, detail.amount, detail.date)
                        .await?;
                }
                CreateOrAppendOutcome::Appended { id: existing.id }
            }
        };
        tx.commit().await?;

        info!("Recorded expense: {:?}", outcome);
        Ok(outcome)
    }

    /// All expenses of the named category, each joined with its details.
    /// Unlike the category breakdown, an unknown name is an error here.
    pub async fn get_by_category_name(&self, name: &str) -> ServiceResult<Vec<ExpenseWithDetails>> {
        let Some(category) = self.categories.find_by_name(name).await? else {
            warn!("Category '{}' not found", name);
            return Err(ServiceError::CategoryNotFound);
        };

        let mut result = Vec::new();
        for expense in self.expenses.list_for_category(category.id).await? {
            let details = self.expenses.details_for(expense.id).await?;
            result.push(ExpenseWithDetails { expense, details });
        }
        Ok(result)
    }

    /// List all expenses
    pub async fn list(&self) -> ServiceResult<Vec<Expense>> {
        Ok(self.expenses.list().await?)
    }

    /// Get a single expense with its details, if it exists
    pub async fn get_by_id(&self, id: i64) -> ServiceResult<Option<ExpenseWithDetails>> {
        let Some(expense) = self.expenses.find_by_id(id).await? else {
            return Ok(None);
        };
        let details = self.expenses.details_for(expense.id).await?;
        Ok(Some(ExpenseWithDetails { expense, details }))
    }

    /// Case-insensitive substring search over expense descriptions
    pub async fn search(&self, query: &str) -> ServiceResult<Vec<Expense>> {
        info!("Searching expenses for '{}'", query);
        Ok(self.expenses.search(query).await?)
    }

    /// Expenses with at least one detail dated inside the inclusive range,
    /// optionally narrowed to one category
    pub async fn filter_by_date_range(
        &self,
        category_id: Option<i64>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> ServiceResult<Vec<Expense>> {
        info!("Filtering expenses between {} and {}", start, end);
        Ok(self
            .expenses
            .filter_by_date_range(category_id, start, end)
            .await?)
    }

    /// Replace an expense's description and its entire detail collection.
    pub async fn update(&self, id: i64, request: UpdateExpenseRequest) -> ServiceResult<()> {
        info!("Updating expense {}", id);

        let mut tx = self.db.pool().begin().await?;

        if !self
            .expenses
            .update_description(&mut tx, id, &request.description)
            .await?
        {
            warn!("Expense {} not found", id);
            return Err(ServiceError::ExpenseNotFound);
        }

        self.expenses.delete_details(&mut tx, id).await?;
        for detail in &request.expense_details {
            self.expenses
                .insert_detail(&mut tx, id, detail.amount, detail.date)
                .await?;
        }
        tx.commit().await?;

        info!("Updated expense {}", id);
        Ok(())
    }

    /// Delete an expense and all of its details.
    pub async fn delete(&self, id: i64) -> ServiceResult<()> {
        info!("Deleting expense {}", id);

        let mut tx = self.db.pool().begin().await?;

        self.expenses.delete_details(&mut tx, id).await?;
        if !self.expenses.delete(&mut tx, id).await? {
            warn!("Expense {} not found", id);
            return Err(ServiceError::ExpenseNotFound);
        }
        tx.commit().await?;

        info!("Deleted expense {}", id);
        Ok(())
    }

    /// Raw rows of the expense/category reporting view for one category name
    pub async fn category_view(&self, name: &str) -> ServiceResult<Vec<ExpenseCategoryViewRow>> {
        Ok(self.expenses.view_rows_for_category(name).await?)
    }
}
