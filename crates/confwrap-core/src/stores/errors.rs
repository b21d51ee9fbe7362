use crate::coercion::CoercionError;
use crate::errors::ConfwrapError;

/// Errors surfaced by stores and the resolver.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("No config value found for key '{key}'")]
    KeyNotFound { key: String },

    #[error(transparent)]
    Coercion(#[from] CoercionError),

    #[error("The {store} store does not support {operation}")]
    UnsupportedOperation {
        store: &'static str,
        operation: String,
    },

    #[error("The {store} store is unavailable: {message}")]
    BackendUnavailable {
        store: &'static str,
        message: String,
    },

    #[error("The {store} store could not be parsed: {message}")]
    MalformedSource {
        store: &'static str,
        message: String,
    },

    #[error("Invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },
}

impl StoreError {
    pub fn unavailable(store: &'static str, message: impl Into<String>) -> Self {
        StoreError::BackendUnavailable {
            store,
            message: message.into(),
        }
    }

    pub fn unsupported(store: &'static str, operation: impl Into<String>) -> Self {
        StoreError::UnsupportedOperation {
            store,
            operation: operation.into(),
        }
    }
}

impl ConfwrapError for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            StoreError::KeyNotFound { .. } => "KEY_NOT_FOUND",
            StoreError::Coercion(_) => "COERCION_FAILED",
            StoreError::UnsupportedOperation { .. } => "UNSUPPORTED_OPERATION",
            StoreError::BackendUnavailable { .. } => "BACKEND_UNAVAILABLE",
            StoreError::MalformedSource { .. } => "MALFORMED_SOURCE",
            StoreError::InvalidKey { .. } => "INVALID_KEY",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            StoreError::KeyNotFound { .. }
                | StoreError::Coercion(_)
                | StoreError::UnsupportedOperation { .. }
                | StoreError::InvalidKey { .. }
        )
    }
}

/// Result type for store and resolver operations
pub type StoreResult<T> = Result<T, StoreError>;
