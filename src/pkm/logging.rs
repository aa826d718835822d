//! Logging bootstrap.
//!
//! The library only talks to the `log` facade. The binary calls
//! [`init_logging`] once at startup; events go to stderr so they never mix
//! with command output.
//!
//! Events are metadata only (`event=store_save module=store notes=3`), never
//! note content or task titles.

use crate::error::{PkmError, Result};
use flexi_logger::{Logger, LoggerHandle};
use once_cell::sync::OnceCell;

pub const LOG_ENV: &str = "PKM_LOG";

const DEFAULT_LEVEL: &str = "warn";
const VERBOSE_LEVEL: &str = "debug";

static LOGGER: OnceCell<LoggerHandle> = OnceCell::new();

/// Picks the log spec: `$PKM_LOG` if set, else `debug` when verbose, else `warn`.
pub fn log_spec(verbose: bool, env_override: Option<&str>) -> String {
    match env_override.map(str::trim).filter(|s| !s.is_empty()) {
        Some(spec) => spec.to_string(),
        None if verbose => VERBOSE_LEVEL.to_string(),
        None => DEFAULT_LEVEL.to_string(),
    }
}

/// Starts the stderr logger. Calling it again is a no-op.
pub fn init_logging(verbose: bool) -> Result<()> {
    let env_override = std::env::var(LOG_ENV).ok();
    let spec = log_spec(verbose, env_override.as_deref());

    LOGGER
        .get_or_try_init(|| {
            Logger::try_with_str(&spec)
                .map_err(|e| PkmError::Config(format!("invalid log spec '{}': {}", spec, e)))?
                .log_to_stderr()
                .format(flexi_logger::default_format)
                .start()
                .map_err(|e| PkmError::Config(format!("failed to start logger: {}", e)))
        })
        .map(|_| ())?;

    log::debug!(
        "event=app_start module=logging version={} spec={}",
        env!("CARGO_PKG_VERSION"),
        spec
    );
    Ok(())
}
