pub mod budget_repository;
pub mod category_repository;
pub mod expense_repository;
pub mod income_repository;

pub use budget_repository::BudgetRepository;
pub use category_repository::CategoryRepository;
pub use expense_repository::ExpenseRepository;
pub use income_repository::IncomeRepository;
