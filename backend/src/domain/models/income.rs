use chrono::NaiveDate;
use sqlx::FromRow;

/// Mirror concept of an expense for money coming in. De-duped by
/// `(description, category_id)` on create.
#[derive(FromRow, Debug, Clone, PartialEq)]
pub struct IncomeSource {
    pub id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub amount: f64,
    pub date: Option<NaiveDate>,
}

/// A dated, amounted entry belonging to an income source.
#[derive(FromRow, Debug, Clone, PartialEq)]
pub struct IncomeEntry {
    pub id: i64,
    pub income_source_id: i64,
    pub amount: Option<f64>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IncomeSourceWithEntries {
    pub source: IncomeSource,
    pub entries: Vec<IncomeEntry>,
}
