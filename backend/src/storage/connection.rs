use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::sync::Arc;

/// The database URL used when none is configured.
pub const DEFAULT_DATABASE_URL: &str = "sqlite:expense_tracker.db";

/// DbConnection manages database operations
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        // Connect to the database
        let pool = SqlitePool::connect(url).await?;

        // Setup database schema
        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize the standard database
    pub async fn init() -> Result<Self> {
        Self::new(DEFAULT_DATABASE_URL).await
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        // Generate a unique database name for tests
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        // Create categories table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Create budgets table. The category link is deliberately nullable
        // and unenforced, mirroring the legacy schema.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS budgets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                category_id INTEGER,
                amount REAL,
                interval TEXT NOT NULL,
                description TEXT
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Create index for budget lookup by category
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_budgets_category_id
            ON budgets(category_id);
            "#,
        )
        .execute(pool)
        .await?;

        // Create expenses table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                description TEXT,
                category_id INTEGER
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Create index for expense lookup by category
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_expenses_category_id
            ON expenses(category_id);
            "#,
        )
        .execute(pool)
        .await?;

        // Create expense_details table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS expense_details (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                expense_id INTEGER,
                amount REAL,
                date TEXT
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Create index for detail lookup by expense
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_expense_details_expense_id
            ON expense_details(expense_id);
            "#,
        )
        .execute(pool)
        .await?;

        // Create income_sources table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS income_sources (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT,
                description TEXT,
                category_id INTEGER,
                amount REAL NOT NULL DEFAULT 0,
                date TEXT
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Create index for income source lookup by category
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_income_sources_category_id
            ON income_sources(category_id);
            "#,
        )
        .execute(pool)
        .await?;

        // Create income_entries table
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS income_entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                income_source_id INTEGER NOT NULL,
                amount REAL,
                date TEXT
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Create index for entry lookup by income source
        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_income_entries_income_source_id
            ON income_entries(income_source_id);
            "#,
        )
        .execute(pool)
        .await?;

        // Create the read-only reporting view joining expense details to
        // their expense and category
        sqlx::query(
            r#"
            CREATE VIEW IF NOT EXISTS expense_category_view AS
            SELECT
                ed.id          AS expense_detail_id,
                ed.expense_id  AS detail_expense_id,
                ed.amount      AS expense_detail_amount,
                ed.date        AS expense_detail_date,
                e.id           AS expense_id,
                e.description  AS expense_description,
                c.id           AS category_id,
                c.name         AS category_name
            FROM expense_details ed
            JOIN expenses e ON ed.expense_id = e.id
            JOIN categories c ON e.category_id = c.id;
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}
