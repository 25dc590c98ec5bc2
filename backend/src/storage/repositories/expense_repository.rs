use chrono::NaiveDate;
use sqlx::SqliteConnection;

use crate::domain::models::{Expense, ExpenseCategoryViewRow, ExpenseDetail};
use crate::storage::connection::DbConnection;

/// Repository for expenses and their detail lines, plus the read-only
/// expense/category reporting view.
#[derive(Clone)]
pub struct ExpenseRepository {
    db: DbConnection,
}

impl ExpenseRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// List all expenses
    pub async fn list(&self) -> Result<Vec<Expense>, sqlx::Error> {
        sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, description, category_id
            FROM expenses
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await
    }

    /// Get a single expense by id
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Expense>, sqlx::Error> {
        sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, description, category_id
            FROM expenses
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await
    }

    /// All expenses recorded under a category
    pub async fn list_for_category(&self, category_id: i64) -> Result<Vec<Expense>, sqlx::Error> {
        sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, description, category_id
            FROM expenses
            WHERE category_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(category_id)
        .fetch_all(self.db.pool())
        .await
    }

    /// Detail lines of one expense
    pub async fn details_for(&self, expense_id: i64) -> Result<Vec<ExpenseDetail>, sqlx::Error> {
        sqlx::query_as::<_, ExpenseDetail>(
            r#"
            SELECT id, expense_id, amount, date
            FROM expense_details
            WHERE expense_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(expense_id)
        .fetch_all(self.db.pool())
        .await
    }

    /// Case-insensitive substring search over descriptions
    pub async fn search(&self, query: &str) -> Result<Vec<Expense>, sqlx::Error> {
        sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, description, category_id
            FROM expenses
            WHERE description IS NOT NULL
              AND instr(lower(description), lower(?)) > 0
            ORDER BY id ASC
            "#,
        )
        .bind(query)
        .fetch_all(self.db.pool())
        .await
    }

    /// Expenses with at least one detail line dated inside the inclusive
    /// range, optionally narrowed to a category. Dates are stored as ISO
    /// text, so lexicographic comparison is chronological.
    pub async fn filter_by_date_range(
        &self,
        category_id: Option<i64>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Expense>, sqlx::Error> {
        let query = if let Some(category_id) = category_id {
            sqlx::query_as::<_, Expense>(
                r#"
                SELECT DISTINCT e.id, e.description, e.category_id
                FROM expenses e
                JOIN expense_details d ON d.expense_id = e.id
                WHERE d.date IS NOT NULL AND d.date >= ? AND d.date <= ?
                  AND e.category_id = ?
                ORDER BY e.id ASC
                "#,
            )
            .bind(start)
            .bind(end)
            .bind(category_id)
        } else {
            sqlx::query_as::<_, Expense>(
                r#"
                SELECT DISTINCT e.id, e.description, e.category_id
                FROM expenses e
                JOIN expense_details d ON d.expense_id = e.id
                WHERE d.date IS NOT NULL AND d.date >= ? AND d.date <= ?
                ORDER BY e.id ASC
                "#,
            )
            .bind(start)
            .bind(end)
        };

        query.fetch_all(self.db.pool()).await
    }

    /// The named read-only query contract over the reporting view:
    /// category name in, raw denormalized rows out.
    pub async fn view_rows_for_category(
        &self,
        category_name: &str,
    ) -> Result<Vec<ExpenseCategoryViewRow>, sqlx::Error> {
        sqlx::query_as::<_, ExpenseCategoryViewRow>(
            r#"
            SELECT expense_detail_id, detail_expense_id, expense_detail_amount,
                   expense_detail_date, expense_id, expense_description,
                   category_id, category_name
            FROM expense_category_view
            WHERE category_name = ?
            "#,
        )
        .bind(category_name)
        .fetch_all(self.db.pool())
        .await
    }

    /// Sum of every detail amount across a category (NULL amounts count
    /// as zero)
    pub async fn category_detail_total(
        &self,
        conn: &mut SqliteConnection,
        category_id: i64,
    ) -> Result<f64, sqlx::Error> {
        let row: (f64,) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(d.amount), 0.0)
            FROM expense_details d
            JOIN expenses e ON d.expense_id = e.id
            WHERE e.category_id = ?
            "#,
        )
        .bind(category_id)
        .fetch_one(conn)
        .await?;
        Ok(row.0)
    }

    /// The category's expense with this exact description, if one exists
    pub async fn find_in_category_by_description(
        &self,
        conn: &mut SqliteConnection,
        category_id: i64,
        description: &str,
    ) -> Result<Option<Expense>, sqlx::Error> {
        sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, description, category_id
            FROM expenses
            WHERE category_id = ? AND description = ?
            LIMIT 1
            "#,
        )
        .bind(category_id)
        .bind(description)
        .fetch_optional(conn)
        .await
    }

    /// Insert an expense row and return its generated id
    pub async fn insert(
        &self,
        conn: &mut SqliteConnection,
        category_id: i64,
        description: &str,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO expenses (description, category_id)
            VALUES (?, ?)
            "#,
        )
        .bind(description)
        .bind(category_id)
        .execute(conn)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Attach one detail line to an expense
    pub async fn insert_detail(
        &self,
        conn: &mut SqliteConnection,
        expense_id: i64,
        amount: Option<f64>,
        date: Option<NaiveDate>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO expense_details (expense_id, amount, date)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(expense_id)
        .bind(amount)
        .bind(date)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Overwrite an expense's description; returns whether the row existed
    pub async fn update_description(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
        description: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE expenses SET description = ? WHERE id = ?")
            .bind(description)
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove every detail line of an expense
    pub async fn delete_details(
        &self,
        conn: &mut SqliteConnection,
        expense_id: i64,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM expense_details WHERE expense_id = ?")
            .bind(expense_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete an expense row; returns whether anything was removed
    pub async fn delete(&self, conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
