//! Error types for the vigil core library.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::OperationStatus;

/// Comprehensive error type for all plan store and controller operations.
#[derive(Error, Debug)]
pub enum VigilError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Plan not found for the given ID
    #[error("Plan with ID {id} not found")]
    PlanNotFound { id: String },
    /// Vehicle not found within the given plan
    #[error("Vehicle {vehicle_id} not found in plan {plan_id}")]
    VehicleNotFound { plan_id: String, vehicle_id: String },
    /// Vehicle check-in attempted on a completed plan
    #[error("Plan {plan_id} is completed; vehicle check-in is locked")]
    CheckInLocked { plan_id: String },
    /// Status change that would move a plan backwards
    #[error("Cannot change status from '{from}' to '{to}'")]
    InvalidTransition {
        from: OperationStatus,
        to: OperationStatus,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Local cache could not be read or written
    #[error("Local cache unavailable: {0}")]
    CacheUnavailable(String),
    /// Remote store errors
    #[error(transparent)]
    Sync(#[from] SyncError),
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Failures reported by a remote store.
///
/// These never abort a mutation: the controller logs them, surfaces them as
/// notices and keeps the optimistic local state.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Network or connectivity failure
    #[error("Remote store unavailable: {0}")]
    Unavailable(String),
    /// Permission or quota rejection
    #[error("Remote store rejected the request: {0}")]
    Rejected(String),
    /// Backend storage failure
    #[error("Remote backend error: {message}")]
    Backend {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Remote payload could not be encoded or decoded
    #[error("Remote payload error: {source}")]
    Payload {
        #[from]
        source: serde_json::Error,
    },
    /// Background task failure
    #[error("Remote task failed: {0}")]
    Task(String),
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> VigilError {
        VigilError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> VigilError {
        VigilError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl VigilError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a plan-not-found error for the given ID.
    pub fn plan_not_found(id: impl Into<String>) -> Self {
        Self::PlanNotFound { id: id.into() }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| VigilError::database(message).with_source(e))
    }
}

/// Result type alias for vigil operations
pub type Result<T> = std::result::Result<T, VigilError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_builder() {
        let err = VigilError::invalid_input("vehiclesCount").with_reason("must be a number");
        assert_eq!(
            err.to_string(),
            "Invalid input for field 'vehiclesCount': must be a number"
        );
    }

    #[test]
    fn test_invalid_transition_message_uses_labels() {
        let err = VigilError::InvalidTransition {
            from: OperationStatus::Completed,
            to: OperationStatus::Planned,
        };
        assert_eq!(
            err.to_string(),
            "Cannot change status from 'Concluído' to 'Planejado'"
        );
    }

    #[test]
    fn test_sync_error_is_transparent() {
        let err: VigilError = SyncError::Unavailable("offline".to_string()).into();
        assert_eq!(err.to_string(), "Remote store unavailable: offline");
    }
}
