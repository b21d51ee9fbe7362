use crate::errors::ConfwrapError;

/// A present value that cannot be converted to the requested type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Cannot cast '{raw}' to type {type_name}.")]
pub struct CoercionError {
    /// The offending raw value (or list segment), rendered as text.
    pub raw: String,
    /// Name of the requested target type.
    pub type_name: &'static str,
}

impl CoercionError {
    pub fn new(raw: impl Into<String>, type_name: &'static str) -> Self {
        Self {
            raw: raw.into(),
            type_name,
        }
    }
}

impl ConfwrapError for CoercionError {
    fn error_code(&self) -> &'static str {
        "COERCION_FAILED"
    }

    fn is_user_error(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coercion_error_display() {
        let error = CoercionError::new("chicken", "f64");
        assert_eq!(error.to_string(), "Cannot cast 'chicken' to type f64.");
        assert_eq!(error.error_code(), "COERCION_FAILED");
        assert!(error.is_user_error());
    }
}
