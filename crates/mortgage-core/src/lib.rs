pub mod amortization;
pub mod error;
pub mod render;
pub mod types;

pub use amortization::{
    analyze_mortgage, generate_schedule, monthly_payment, monthly_rate, MortgageInput,
};
pub use error::MortgageError;
pub use types::*;

/// Standard result type for all mortgage operations
pub type MortgageResult<T> = Result<T, MortgageError>;
