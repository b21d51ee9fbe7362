use std::error::Error;

/// Base trait for all confwrap errors
pub trait ConfwrapError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether the error stems from caller input (bad key, bad value) rather
    /// than from the store itself
    fn is_user_error(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coercion::CoercionError;
    use crate::stores::StoreError;

    #[test]
    fn test_errors_share_the_base_trait() {
        let missing = StoreError::KeyNotFound {
            key: "missing".to_string(),
        };
        let unavailable = StoreError::unavailable("ini", "gone");
        let coercion = CoercionError::new("chicken", "f64");

        let errors: [&dyn ConfwrapError; 3] = [&missing, &unavailable, &coercion];
        let codes: Vec<_> = errors.iter().map(|error| error.error_code()).collect();
        assert_eq!(codes, vec!["KEY_NOT_FOUND", "BACKEND_UNAVAILABLE", "COERCION_FAILED"]);

        let user_errors: Vec<_> = errors.iter().map(|error| error.is_user_error()).collect();
        assert_eq!(user_errors, vec![true, false, true]);
        assert_eq!(errors[0].to_string(), "No config value found for key 'missing'");
    }
}
