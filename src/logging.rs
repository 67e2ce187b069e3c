use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SITEADMIN_LOG";

/// Installs the global subscriber writing to stderr. `SITEADMIN_LOG` takes
/// an `EnvFilter` directive; `default` applies when it is unset or invalid.
pub fn init(default: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
