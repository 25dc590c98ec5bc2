use thiserror::Error;

/// Result alias used by all domain services.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failure taxonomy for the bookkeeping operations. Each variant maps to a
/// distinct HTTP status in the REST layer, so callers can tell validation
/// problems, missing records, business-rule rejections, and storage faults
/// apart.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A required field was empty or malformed; rejected before any write.
    #[error("{0}")]
    Validation(String),

    #[error("Category not found.")]
    CategoryNotFound,

    #[error("Expense not found.")]
    ExpenseNotFound,

    #[error("Income source not found.")]
    IncomeSourceNotFound,

    /// Adding the submitted detail lines would push the category total past
    /// one of its budget ceilings.
    #[error("Total expenses exceed budget limit.")]
    BudgetExceeded,

    /// An income entry date fell outside the store's representable range.
    #[error("Date must be between 1753-01-01 and 9999-12-31.")]
    EntryDateOutOfRange,

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}
