use sqlx::SqliteConnection;

use crate::domain::models::Budget;

/// Repository for budget rows.
///
/// The schema allows several budgets per category; where the operations
/// assume a single one ("first-match" update and decrement), first means
/// lowest id. Budgets are only ever touched inside a larger unit of work,
/// so every method runs on the transaction's connection and the repository
/// itself carries no pool.
#[derive(Clone, Copy, Default)]
pub struct BudgetRepository;

impl BudgetRepository {
    pub fn new() -> Self {
        Self
    }

    /// All budgets attached to a category, oldest first
    pub async fn list_for_category(
        &self,
        conn: &mut SqliteConnection,
        category_id: i64,
    ) -> Result<Vec<Budget>, sqlx::Error> {
        sqlx::query_as::<_, Budget>(
            r#"
            SELECT id, category_id, amount, interval, description
            FROM budgets
            WHERE category_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(category_id)
        .fetch_all(conn)
        .await
    }

    /// The category's first (lowest-id) budget, if any
    pub async fn first_for_category(
        &self,
        conn: &mut SqliteConnection,
        category_id: i64,
    ) -> Result<Option<Budget>, sqlx::Error> {
        sqlx::query_as::<_, Budget>(
            r#"
            SELECT id, category_id, amount, interval, description
            FROM budgets
            WHERE category_id = ?
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(category_id)
        .fetch_optional(conn)
        .await
    }

    /// Insert a budget row and return its generated id
    pub async fn insert(
        &self,
        conn: &mut SqliteConnection,
        category_id: i64,
        amount: Option<f64>,
        interval: &str,
        description: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO budgets (category_id, amount, interval, description)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(category_id)
        .bind(amount)
        .bind(interval)
        .bind(description)
        .execute(conn)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Overwrite a budget's ceiling, interval, and description
    pub async fn update(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
        amount: Option<f64>,
        interval: &str,
        description: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE budgets
            SET amount = ?, interval = ?, description = ?
            WHERE id = ?
            "#,
        )
        .bind(amount)
        .bind(interval)
        .bind(description)
        .bind(id)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Subtract `delta` from the category's first budget with a non-null
    /// ceiling. A no-op when the category has no such budget.
    pub async fn decrement_first(
        &self,
        conn: &mut SqliteConnection,
        category_id: i64,
        delta: f64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE budgets
            SET amount = amount - ?
            WHERE id = (
                SELECT id FROM budgets
                WHERE category_id = ? AND amount IS NOT NULL
                ORDER BY id ASC
                LIMIT 1
            )
            "#,
        )
        .bind(delta)
        .bind(category_id)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Remove every budget attached to a category
    pub async fn delete_for_category(
        &self,
        conn: &mut SqliteConnection,
        category_id: i64,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM budgets WHERE category_id = ?")
            .bind(category_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }
}
