use thiserror::Error;

#[derive(Debug, Error)]
pub enum StrInvestError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for StrInvestError {
    fn from(e: serde_json::Error) -> Self {
        StrInvestError::SerializationError(e.to_string())
    }
}

impl StrInvestError {
    /// A result that does not fit the 96-bit Decimal mantissa.
    pub fn out_of_range(field: &str) -> Self {
        StrInvestError::InvalidInput {
            field: field.into(),
            reason: "Result exceeds the representable decimal range".into(),
        }
    }
}
