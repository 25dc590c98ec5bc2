//! # Domain Module
//!
//! Business logic for the expense tracker, independent of HTTP concerns.
//!
//! Each aggregate gets a service: [`CategoryService`] for categories and
//! their budgets, [`ExpenseService`] for expenses and detail lines,
//! [`IncomeService`] for income sources and entries. Services own the
//! transaction boundaries; repositories never begin or commit one
//! themselves.

pub mod category_service;
pub mod errors;
pub mod expense_service;
pub mod income_service;
pub mod models;

pub use category_service::CategoryService;
pub use errors::{ServiceError, ServiceResult};
pub use expense_service::ExpenseService;
pub use income_service::IncomeService;
