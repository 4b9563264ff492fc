//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::{DEFAULT_LOG_FILTER, LOG_ENV_VAR};

static INIT: Once = Once::new();

/// Initialize the mailsig tracing/logging system.
///
/// Reads the `MAILSIG_LOG` environment variable for per-module log levels.
/// Format: `MAILSIG_LOG=mailsig_analysis::ingest=debug,mailsig_analysis::rules=trace`
///
/// Falls back to `mailsig=info` if `MAILSIG_LOG` is not set or is invalid.
/// Idempotent.
pub fn init_tracing() {
    init_tracing_with_default(DEFAULT_LOG_FILTER);
}

/// Same as [`init_tracing`], with a caller-chosen fallback filter
/// (the CLI passes `mailsig=debug` under `--verbose`).
pub fn init_tracing_with_default(default_filter: &str) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(default_filter));

        // Reports go to stdout; logs stay on stderr.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}
