use tracing::{info, warn};

use crate::domain::errors::{ServiceError, ServiceResult};
use crate::domain::models::{Category, CategoryBreakdown, ExpenseWithDetails, IncomeSourceWithEntries};
use crate::storage::{
    BudgetRepository, CategoryRepository, DbConnection, ExpenseRepository, IncomeRepository,
};
use shared::{CreateCategoryRequest, UpdateBudgetRequest};

/// Service for managing spending categories and their budgets.
#[derive(Clone)]
pub struct CategoryService {
    db: DbConnection,
    categories: CategoryRepository,
    budgets: BudgetRepository,
    expenses: ExpenseRepository,
    incomes: IncomeRepository,
}

impl CategoryService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            categories: CategoryRepository::new(db.clone()),
            budgets: BudgetRepository::new(),
            expenses: ExpenseRepository::new(db.clone()),
            incomes: IncomeRepository::new(db.clone()),
            db,
        }
    }

    /// List all categories
    pub async fn list(&self) -> ServiceResult<Vec<Category>> {
        info!("Listing all categories");
        Ok(self.categories.list().await?)
    }

    /// Create a category, and when the request carries a positive budget
    /// amount together with a non-empty interval, its initial budget row.
    /// Both rows land in one transaction.
    pub async fn create(&self, request: CreateCategoryRequest) -> ServiceResult<Category> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(ServiceError::Validation(
                "Category name cannot be empty".to_string(),
            ));
        }

        info!("Creating category: {}", name);

        let mut tx = self.db.pool().begin().await?;
        let category_id = self.categories.insert(&mut tx, name).await?;

        if let (Some(amount), Some(interval)) = (request.budget, request.interval.as_deref()) {
            if amount > 0.0 && !interval.trim().is_empty() {
                self.budgets
                    .insert(
                        &mut tx,
                        category_id,
                        Some(amount),
                        interval,
                        request.description.as_deref(),
                    )
                    .await?;
            }
        }
        tx.commit().await?;

        info!("Created category {} with id {}", name, category_id);

        Ok(Category {
            id: category_id,
            name: name.to_string(),
        })
    }

    /// Everything recorded under the named category: expenses joined with
    /// their details, income sources joined with their entries. A missing
    /// category yields an empty breakdown, not an error.
    pub async fn breakdown_by_name(&self, name: &str) -> ServiceResult<CategoryBreakdown> {
        info!("Looking up category breakdown for '{}'", name);

        let Some(category) = self.categories.find_by_name(name).await? else {
            info!("Category '{}' not found, returning empty breakdown", name);
            return Ok(CategoryBreakdown::default());
        };

        let mut expenses = Vec::new();
        for expense in self.expenses.list_for_category(category.id).await? {
            let details = self.expenses.details_for(expense.id).await?;
            expenses.push(ExpenseWithDetails { expense, details });
        }

        let mut income_sources = Vec::new();
        for source in self.incomes.list_for_category(category.id).await? {
            let entries = self.incomes.entries_for(source.id).await?;
            income_sources.push(IncomeSourceWithEntries { source, entries });
        }

        Ok(CategoryBreakdown {
            expenses,
            income_sources,
        })
    }

    /// Overwrite the category's budget, or create one if the category has
    /// none yet. With several budget rows present, first-match (lowest id)
    /// wins, as the operations on this schema have always assumed.
    pub async fn update_budget(
        &self,
        category_id: i64,
        request: UpdateBudgetRequest,
    ) -> ServiceResult<()> {
        info!("Updating budget for category {}", category_id);

        let mut tx = self.db.pool().begin().await?;

        if self.categories.find_by_id(&mut tx, category_id).await?.is_none() {
            warn!("Category {} not found", category_id);
            return Err(ServiceError::CategoryNotFound);
        }

        match self.budgets.first_for_category(&mut tx, category_id).await? {
            Some(budget) => {
                self.budgets
                    .update(
                        &mut tx,
                        budget.id,
                        request.budget,
                        &request.interval,
                        request.description.as_deref(),
                    )
                    .await?;
            }
            None => {
                self.budgets
                    .insert(
                        &mut tx,
                        category_id,
                        request.budget,
                        &request.interval,
                        request.description.as_deref(),
                    )
                    .await?;
            }
        }
        tx.commit().await?;

        info!("Updated budget for category {}", category_id);
        Ok(())
    }

    /// Delete a category and all of its budgets, transactionally.
    pub async fn delete(&self, category_id: i64) -> ServiceResult<()> {
        info!("Deleting category {}", category_id);

        let mut tx = self.db.pool().begin().await?;

        if self.categories.find_by_id(&mut tx, category_id).await?.is_none() {
            warn!("Category {} not found", category_id);
            return Err(ServiceError::CategoryNotFound);
        }

        let removed = self.budgets.delete_for_category(&mut tx, category_id).await?;
        self.categories.delete(&mut tx, category_id).await?;
        tx.commit().await?;

        info!("Deleted category {} and {} budget(s)", category_id, removed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::expense_service::ExpenseService;
    use crate::domain::income_service::IncomeService;
    use shared::{CreateExpenseRequest, CreateIncomeSourceRequest, ExpenseDetailPayload, IncomeEntryPayload};

    async fn setup_test() -> (DbConnection, CategoryService) {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let service = CategoryService::new(db.clone());
        (db, service)
    }

    fn create_request(name: &str, budget: Option<f64>, interval: Option<&str>) -> CreateCategoryRequest {
        CreateCategoryRequest {
            name: name.to_string(),
            budget,
            interval: interval.map(str::to_string),
            description: None,
        }
    }

    async fn count(db: &DbConnection, sql: &str, id: i64) -> i64 {
        let (n,): (i64,) = sqlx::query_as(sql)
            .bind(id)
            .fetch_one(db.pool())
            .await
            .expect("Failed to count rows");
        n
    }

    #[tokio::test]
    async fn test_create_category() {
        let (_db, service) = setup_test().await;

        let category = service
            .create(create_request("Food", None, None))
            .await
            .expect("Failed to create category");

        assert_eq!(category.name, "Food");

        let listed = service.list().await.expect("Failed to list categories");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, category.id);
    }

    #[tokio::test]
    async fn test_create_category_empty_name_persists_nothing() {
        let (_db, service) = setup_test().await;

        let result = service.create(create_request("   ", None, None)).await;
        assert!(matches!(result, Err(ServiceError::Validation(_))));

        let listed = service.list().await.expect("Failed to list categories");
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn test_create_category_with_budget_creates_one_budget_row() {
        let (db, service) = setup_test().await;

        let category = service
            .create(create_request("Food", Some(100.0), Some("monthly")))
            .await
            .expect("Failed to create category");

        let budgets = count(&db, "SELECT COUNT(*) FROM budgets WHERE category_id = ?", category.id).await;
        assert_eq!(budgets, 1);
    }

    #[tokio::test]
    async fn test_zero_budget_or_missing_interval_creates_no_budget_row() {
        let (db, service) = setup_test().await;

        let zero = service
            .create(create_request("Zero", Some(0.0), Some("monthly")))
            .await
            .expect("Failed to create category");
        let no_interval = service
            .create(create_request("NoInterval", Some(50.0), None))
            .await
            .expect("Failed to create category");
        let blank_interval = service
            .create(create_request("BlankInterval", Some(50.0), Some("  ")))
            .await
            .expect("Failed to create category");

        for id in [zero.id, no_interval.id, blank_interval.id] {
            let budgets = count(&db, "SELECT COUNT(*) FROM budgets WHERE category_id = ?", id).await;
            assert_eq!(budgets, 0);
        }
    }

    #[tokio::test]
    async fn test_update_budget_overwrites_existing_row() {
        let (db, service) = setup_test().await;

        let category = service
            .create(create_request("Food", Some(100.0), Some("monthly")))
            .await
            .expect("Failed to create category");

        service
            .update_budget(
                category.id,
                UpdateBudgetRequest {
                    budget: Some(250.0),
                    interval: "weekly".to_string(),
                    description: Some("groceries".to_string()),
                },
            )
            .await
            .expect("Failed to update budget");

        // Still exactly one row, with the new values
        let budgets = count(&db, "SELECT COUNT(*) FROM budgets WHERE category_id = ?", category.id).await;
        assert_eq!(budgets, 1);

        let (amount, interval): (Option<f64>, String) =
            sqlx::query_as("SELECT amount, interval FROM budgets WHERE category_id = ?")
                .bind(category.id)
                .fetch_one(db.pool())
                .await
                .expect("Failed to read budget");
        assert_eq!(amount, Some(250.0));
        assert_eq!(interval, "weekly");
    }

    #[tokio::test]
    async fn test_update_budget_inserts_when_category_has_none() {
        let (db, service) = setup_test().await;

        let category = service
            .create(create_request("Food", None, None))
            .await
            .expect("Failed to create category");

        service
            .update_budget(
                category.id,
                UpdateBudgetRequest {
                    budget: Some(80.0),
                    interval: "monthly".to_string(),
                    description: None,
                },
            )
            .await
            .expect("Failed to update budget");

        let budgets = count(&db, "SELECT COUNT(*) FROM budgets WHERE category_id = ?", category.id).await;
        assert_eq!(budgets, 1);
    }

    #[tokio::test]
    async fn test_update_budget_unknown_category() {
        let (_db, service) = setup_test().await;

        let result = service
            .update_budget(
                999,
                UpdateBudgetRequest {
                    budget: Some(80.0),
                    interval: "monthly".to_string(),
                    description: None,
                },
            )
            .await;
        assert!(matches!(result, Err(ServiceError::CategoryNotFound)));
    }

    #[tokio::test]
    async fn test_delete_category_removes_budgets() {
        let (db, service) = setup_test().await;

        let category = service
            .create(create_request("Food", Some(100.0), Some("monthly")))
            .await
            .expect("Failed to create category");

        service.delete(category.id).await.expect("Failed to delete category");

        let budgets = count(&db, "SELECT COUNT(*) FROM budgets WHERE category_id = ?", category.id).await;
        assert_eq!(budgets, 0);
        assert!(service.list().await.expect("Failed to list").is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_category() {
        let (_db, service) = setup_test().await;

        let result = service.delete(42).await;
        assert!(matches!(result, Err(ServiceError::CategoryNotFound)));
    }

    #[tokio::test]
    async fn test_breakdown_for_missing_category_is_empty() {
        let (_db, service) = setup_test().await;

        let breakdown = service
            .breakdown_by_name("nope")
            .await
            .expect("Breakdown lookup failed");
        assert!(breakdown.expenses.is_empty());
        assert!(breakdown.income_sources.is_empty());
    }

    #[tokio::test]
    async fn test_breakdown_joins_expenses_and_income() {
        let (db, service) = setup_test().await;
        let expense_service = ExpenseService::new(db.clone());
        let income_service = IncomeService::new(db.clone());

        let category = service
            .create(create_request("Food", None, None))
            .await
            .expect("Failed to create category");

        expense_service
            .create_or_append(CreateExpenseRequest {
                description: "Lunch".to_string(),
                category_id: category.id,
                expense_details: vec![ExpenseDetailPayload {
                    amount: Some(12.5),
                    date: None,
                }],
            })
            .await
            .expect("Failed to create expense");

        income_service
            .create_or_append(CreateIncomeSourceRequest {
                description: "Salary".to_string(),
                category_id: category.id,
                income_entries: vec![IncomeEntryPayload {
                    amount: Some(1000.0),
                    date: None,
                }],
            })
            .await
            .expect("Failed to create income source");

        let breakdown = service
            .breakdown_by_name("Food")
            .await
            .expect("Breakdown lookup failed");
        assert_eq!(breakdown.expenses.len(), 1);
        assert_eq!(breakdown.expenses[0].details.len(), 1);
        assert_eq!(breakdown.income_sources.len(), 1);
        assert_eq!(breakdown.income_sources[0].entries.len(), 1);
    }
}
