use std::error::Error;

use confwrap_core::{CoercionError, ConfwrapError, StoreError, init_logging};
use tracing::error;

mod app;
mod commands;

/// The library error behind a command failure, if there is one.
fn confwrap_error<'a>(error: &'a (dyn Error + 'static)) -> Option<&'a dyn ConfwrapError> {
    if let Some(store_error) = error.downcast_ref::<StoreError>() {
        return Some(store_error);
    }
    error
        .downcast_ref::<CoercionError>()
        .map(|coercion_error| coercion_error as &dyn ConfwrapError)
}

fn main() {
    let app = app::build_cli();
    let matches = app.get_matches();

    let verbose = matches.get_flag("verbose");
    init_logging(verbose);

    if let Err(e) = commands::run_command(&matches) {
        eprintln!("Error: {}", e);
        match confwrap_error(e.as_ref()) {
            Some(cause) => error!(
                event = "cli.command_failed",
                error = %e,
                error_code = cause.error_code(),
                user_error = cause.is_user_error()
            ),
            None => error!(event = "cli.command_failed", error = %e),
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confwrap_error_finds_library_errors() {
        let missing: Box<dyn Error> = Box::new(StoreError::KeyNotFound {
            key: "port".to_string(),
        });
        let cause = confwrap_error(missing.as_ref()).unwrap();
        assert_eq!(cause.error_code(), "KEY_NOT_FOUND");
        assert!(cause.is_user_error());

        let coercion: Box<dyn Error> = Box::new(CoercionError::new("x", "i64"));
        assert_eq!(
            confwrap_error(coercion.as_ref()).unwrap().error_code(),
            "COERCION_FAILED"
        );

        let other: Box<dyn Error> = "Unknown command".into();
        assert!(confwrap_error(other.as_ref()).is_none());
    }
}
