//! Structured JSON logging on stderr.
//!
//! Events carry a dotted `event` field (`core.resolver.bound`,
//! `cli.command_failed`). stdout stays free for command output.

use tracing_subscriber::filter::Directive;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// `RUST_LOG` directives plus a floor for every `confwrap*` target.
///
/// The floor is `error`, or `info` when `verbose`. More specific `RUST_LOG`
/// targets such as `confwrap_core::stores=debug` still apply.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let floor = if verbose {
        "confwrap=info"
    } else {
        "confwrap=error"
    };

    let filter = EnvFilter::new(rust_log.unwrap_or_default());
    match floor.parse::<Directive>() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Installs the JSON subscriber.
///
/// A subscriber installed earlier, by an embedding application or a previous
/// call, is left in place.
pub fn init_logging(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(log_filter(verbose, rust_log.as_deref()))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directives(filter: EnvFilter) -> String {
        filter.to_string().to_lowercase()
    }

    #[test]
    fn test_floor_follows_verbosity() {
        assert!(directives(log_filter(false, None)).contains("confwrap=error"));
        assert!(directives(log_filter(true, None)).contains("confwrap=info"));
    }

    #[test]
    fn test_rust_log_directives_are_kept() {
        let filter = directives(log_filter(false, Some("confwrap_core::stores=debug")));
        assert!(filter.contains("confwrap_core::stores=debug"), "got {}", filter);
        assert!(filter.contains("confwrap=error"), "got {}", filter);
    }

    #[test]
    fn test_init_logging_twice_does_not_panic() {
        init_logging(false);
        init_logging(true);
    }
}
