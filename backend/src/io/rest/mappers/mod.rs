//! Domain model to wire DTO conversion. All default-coercion of nullable
//! store columns lives here, keeping both the domain and the handlers free
//! of wire-format decisions.

pub mod category_mapper;
pub mod expense_mapper;
pub mod income_mapper;
