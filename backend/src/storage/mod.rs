//! # Storage Module
//!
//! Handles all data persistence for the expense tracker.
//!
//! SQLite via SQLx is the backing store: six tables (categories, budgets,
//! expenses, expense_details, income_sources, income_entries) plus the
//! read-only `expense_category_view`. Foreign keys are nullable and
//! unenforced, matching the legacy schema this replaces.
//!
//! ## Key Responsibilities
//!
//! - **Connection Management**: pooled connections behind [`DbConnection`]
//! - **Schema Setup**: idempotent table/index/view creation at startup
//! - **Repositories**: one per aggregate, keeping SQL out of the domain
//!   layer
//!
//! Repository write methods take a `&mut SqliteConnection` so that a domain
//! service can compose several of them inside one transaction and commit or
//! roll back atomically.

pub mod connection;
pub mod repositories;

pub use connection::DbConnection;
pub use repositories::*;
