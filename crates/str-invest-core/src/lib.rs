pub mod error;
pub mod rental;
pub mod time_value;
pub mod types;

pub use error::StrInvestError;
pub use types::*;

/// Standard result type for all str-invest operations
pub type StrInvestResult<T> = Result<T, StrInvestError>;
