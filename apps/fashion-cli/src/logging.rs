//! Tracing/logging bootstrap for the CLI.

use std::{env, io};

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,fashion_cli=debug,fashion_http=debug";

/// Initialize global tracing subscriber with severity gating from environment.
///
/// Precedence:
/// 1) `RUST_LOG`
/// 2) `FASHION_CLI_LOG`
/// 3) `FASHION_LOG`
/// 4) internal default filter
///
/// Logs go to stderr so command output on stdout stays pipeable.
pub fn init() {
    let directives = directives_from_lookup(|key| env::var(key).ok());
    let _ = tracing_subscriber::fmt()
        .with_target(true)
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::new(directives))
        .try_init();
}

/// First non-blank, parseable filter in precedence order.
fn directives_from_lookup<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    for key in [EnvFilter::DEFAULT_ENV, "FASHION_CLI_LOG", "FASHION_LOG"] {
        if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty())
            && EnvFilter::try_new(&value).is_ok()
        {
            return value;
        }
    }

    DEFAULT_FILTER.to_owned()
}
