//! Error types for the salary calculation engine.
//!
//! A calculation run surfaces exactly one kind of failure to its caller,
//! [`EngineError::DataAccess`]. The remaining variants belong to the
//! surfaces around a run: configuration loading and period construction.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the salary calculation engine.
///
/// # Example
///
/// ```
/// use salary_engine::error::EngineError;
///
/// let error = EngineError::DataAccess {
///     operation: "get_employee".to_string(),
///     message: "employee 42 not found".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Data access failed during 'get_employee': employee 42 not found"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds a value the engine cannot use.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A pay period whose end date precedes its start date.
    #[error("Invalid pay period: end date {end} is before start date {start}")]
    InvalidPeriod {
        /// The requested start date.
        start: NaiveDate,
        /// The requested end date.
        end: NaiveDate,
    },

    /// Reading reference/attendance data or writing result rows failed.
    #[error("Data access failed during '{operation}': {message}")]
    DataAccess {
        /// The data store operation that failed.
        operation: String,
        /// A description of the failure.
        message: String,
    },
}

impl EngineError {
    /// Builds a [`EngineError::DataAccess`] for the named store operation.
    pub fn data_access(operation: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::DataAccess {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
