pub mod constraint_validator;
pub mod financial_validator;

pub use constraint_validator::ConstraintValidator;
pub use financial_validator::FinancialValidator;
