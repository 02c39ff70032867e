//! Error types for the bounded cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache operations and configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key fails the non-empty / length check on set
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Raw value cannot be coerced to the configured value type.
    /// The failed set leaves cache state untouched.
    #[error("Value cannot be converted to {expected_type}")]
    ValueConversionFailed {
        /// Name of the configured target type
        expected_type: String,
    },

    /// Configuration names a value type that is neither a built-in
    /// nor present in the supplied type registry
    #[error("Unknown value type: {0}")]
    UnknownValueType(String),
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
