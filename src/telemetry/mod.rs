//! 日志模块：为宿主进程安装 tracing 日志订阅者。
//!
//! Logging setup.
//!
//! The library itself only emits `tracing` events. Hosts that have no subscriber of
//! their own can call [`init_logging`] once at startup.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_DIRECTIVE: &str = "info";

/// Build the filter from `RUST_LOG`, falling back to `default_directive`.
pub fn env_filter(default_directive: &str) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(default_directive)?),
    }
}

/// Install a global fmt subscriber.
///
/// Returns `Ok(false)` when a global subscriber was already set.
pub fn init_logging() -> anyhow::Result<bool> {
    let filter = env_filter(DEFAULT_LOG_DIRECTIVE)?;
    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok())
}
