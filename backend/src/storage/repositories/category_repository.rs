use sqlx::SqliteConnection;

use crate::domain::models::Category;
use crate::storage::connection::DbConnection;

/// Repository for category rows.
///
/// Plain lookups run against the pool; anything a service composes into a
/// larger unit of work takes the transaction's connection instead.
#[derive(Clone)]
pub struct CategoryRepository {
    db: DbConnection,
}

impl CategoryRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// List all categories
    pub async fn list(&self) -> Result<Vec<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name
            FROM categories
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await
    }

    /// Find a category by its exact name
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name
            FROM categories
            WHERE name = ?
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(self.db.pool())
        .await
    }

    /// Find a category by id on an in-flight transaction
    pub async fn find_by_id(
        &self,
        conn: &mut SqliteConnection,
        id: i64,
    ) -> Result<Option<Category>, sqlx::Error> {
        sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name
            FROM categories
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await
    }

    /// Insert a category and return its generated id
    pub async fn insert(&self, conn: &mut SqliteConnection, name: &str) -> Result<i64, sqlx::Error> {
        let result = sqlx::query("INSERT INTO categories (name) VALUES (?)")
            .bind(name)
            .execute(conn)
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Delete a category row; returns whether anything was removed
    pub async fn delete(&self, conn: &mut SqliteConnection, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
