use chrono::NaiveDate;
use sqlx::SqliteConnection;

use crate::domain::models::{IncomeEntry, IncomeSource};
use crate::storage::connection::DbConnection;

/// Repository for income sources and their entries.
#[derive(Clone)]
pub struct IncomeRepository {
    db: DbConnection,
}

impl IncomeRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Get a single income source by id
    pub async fn find_by_id(&self, id: i64) -> Result<Option<IncomeSource>, sqlx::Error> {
        sqlx::query_as::<_, IncomeSource>(
            r#"
            SELECT id, name, description, category_id, amount, date
            FROM income_sources
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await
    }

    /// All income sources recorded under a category
    pub async fn list_for_category(
        &self,
        category_id: i64,
    ) -> Result<Vec<IncomeSource>, sqlx::Error> {
        sqlx::query_as::<_, IncomeSource>(
            r#"
            SELECT id, name, description, category_id, amount, date
            FROM income_sources
            WHERE category_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(category_id)
        .fetch_all(self.db.pool())
        .await
    }

    /// Entries of one income source
    pub async fn entries_for(&self, source_id: i64) -> Result<Vec<IncomeEntry>, sqlx::Error> {
        sqlx::query_as::<_, IncomeEntry>(
            r#"
            SELECT id, income_source_id, amount, date
            FROM income_entries
            WHERE income_source_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(source_id)
        .fetch_all(self.db.pool())
        .await
    }

    /// Case-insensitive substring search over descriptions
    pub async fn search(&self, query: &str) -> Result<Vec<IncomeSource>, sqlx::Error> {
        sqlx::query_as::<_, IncomeSource>(
            r#"
            SELECT id, name, description, category_id, amount, date
            FROM income_sources
            WHERE description IS NOT NULL
              AND instr(lower(description), lower(?)) > 0
            ORDER BY id ASC
            "#,
        )
        .bind(query)
        .fetch_all(self.db.pool())
        .await
    }

    /// Income sources whose own date lies inside the inclusive range
    pub async fn filter_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<IncomeSource>, sqlx::Error> {
        sqlx::query_as::<_, IncomeSource>(
            r#"
            SELECT id, name, description, category_id, amount, date
            FROM income_sources
            WHERE date IS NOT NULL AND date >= ? AND date <= ?
            ORDER BY id ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(self.db.pool())
        .await
    }

    /// The natural de-dup lookup: same description under the same category
    pub async fn find_by_description_and_category(
        &self,
        conn: &mut SqliteConnection,
        description: &str,
        category_id: i64,
    ) -> Result<Option<IncomeSource>, sqlx::Error> {
        sqlx::query_as::<_, IncomeSource>(
            r#"
            SELECT id, name, description, category_id, amount, date
            FROM income_sources
            WHERE description = ? AND category_id = ?
            LIMIT 1
            "#,
        )
        .bind(description)
        .bind(category_id)
        .fetch_optional(conn)
        .await
    }

    /// Insert an income source and return its generated id
    pub async fn insert(
        &self,
        conn: &mut SqliteConnection,
        description: &str,
        category_id: i64,
    ) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO income_sources (description, category_id)
            VALUES (?, ?)
            "#,
        )
        .bind(description)
        .bind(category_id)
        .execute(conn)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Attach one entry to an income source
    pub async fn insert_entry(
        &self,
        conn: &mut SqliteConnection,
        source_id: i64,
        amount: Option<f64>,
        date: Option<NaiveDate>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO income_entries (income_source_id, amount, date)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(source_id)
        .bind(amount)
        .bind(date)
        .execute(conn)
        .await?;
        Ok(())
    }

    /// Overwrite a source's description and category link; a `None` link
    /// clears it. Returns whether the row existed.
    pub async fn update_source(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
        description: &str,
        category_id: Option<i64>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE income_sources
            SET description = ?, category_id = ?
            WHERE id = ?
            "#,
        )
        .bind(description)
        .bind(category_id)
        .bind(id)
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Remove every entry of an income source
    pub async fn delete_entries(
        &self,
        conn: &mut SqliteConnection,
        source_id: i64,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM income_entries WHERE income_source_id = ?")
            .bind(source_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete an income source row; returns whether anything was removed
    pub async fn delete(&self, conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM income_sources WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
