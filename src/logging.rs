//! Tracing subscriber setup for the `quire` binary
//!
//! `QUIRE_LOG` takes an `EnvFilter` directive (e.g. `quire=debug`). Without
//! it the `-v` count picks the level. Logs go to stderr so `--json` output
//! on stdout stays machine-readable.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "QUIRE_LOG";

/// Filter directive for a verbosity count, unless `env` overrides it
pub fn filter_directive(verbose: u8, env: Option<&str>) -> String {
    if let Some(directive) = env.map(str::trim).filter(|d| !d.is_empty()) {
        return directive.to_string();
    }
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("quire={level}")
}

/// Install the global fmt subscriber
pub fn init(verbose: u8) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let env = std::env::var(LOG_ENV).ok();
    let filter = EnvFilter::try_new(filter_directive(verbose, env.as_deref()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .compact()
        .try_init()
}
