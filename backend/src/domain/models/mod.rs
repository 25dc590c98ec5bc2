//! Entity models as the domain layer sees them: nullable columns stay
//! `Option` here; coercion to wire defaults happens in the REST mappers.

pub mod category;
pub mod expense;
pub mod income;

pub use category::*;
pub use expense::*;
pub use income::*;

/// Whether a create-or-append call produced a new parent row or appended
/// line items to an existing one. Both the expense and income paths report
/// this so the REST layer can phrase its confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOrAppendOutcome {
    Created { id: i64 },
    Appended { id: i64 },
}

impl CreateOrAppendOutcome {
    pub fn id(&self) -> i64 {
        match *self {
            CreateOrAppendOutcome::Created { id } => id,
            CreateOrAppendOutcome::Appended { id } => id,
        }
    }
}
