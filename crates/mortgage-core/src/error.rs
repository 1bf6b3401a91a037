use thiserror::Error;

#[derive(Debug, Error)]
pub enum MortgageError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Financial impossibility: {0}")]
    FinancialImpossibility(String),

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Render error: {0}")]
    Render(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl MortgageError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        MortgageError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True when the caller supplied terms the engine cannot work with.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            MortgageError::InvalidInput { .. }
                | MortgageError::FinancialImpossibility(_)
                | MortgageError::DivisionByZero { .. }
        )
    }
}

impl From<serde_json::Error> for MortgageError {
    fn from(e: serde_json::Error) -> Self {
        MortgageError::SerializationError(e.to_string())
    }
}

impl From<std::io::Error> for MortgageError {
    fn from(e: std::io::Error) -> Self {
        MortgageError::Render(e.to_string())
    }
}

#[cfg(feature = "csv")]
impl From<csv::Error> for MortgageError {
    fn from(e: csv::Error) -> Self {
        MortgageError::Render(format!("csv: {e}"))
    }
}

#[cfg(feature = "html")]
impl From<minijinja::Error> for MortgageError {
    fn from(e: minijinja::Error) -> Self {
        MortgageError::Render(format!("template: {e}"))
    }
}

#[cfg(feature = "pdf")]
impl From<printpdf::Error> for MortgageError {
    fn from(e: printpdf::Error) -> Self {
        MortgageError::Render(format!("pdf: {e}"))
    }
}
