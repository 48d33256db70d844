// src/logging.rs
use env_logger::{Builder, DEFAULT_FILTER_ENV, Env};
use log::LevelFilter;

/// Workspace crates at `debug`, dependencies at `warn`.
const FILTER: &str = "warn,notecount=debug,notecount_usecase=debug,notecount_infra=debug,notecount_domain=debug";

fn env_overrides() -> bool {
    std::env::var_os(DEFAULT_FILTER_ENV).is_some()
}

/// Installs the logger. `RUST_LOG` takes precedence; otherwise only
/// warnings are shown until [`enable_debug`] is called.
pub fn init(debug: bool) {
    let mut builder = Builder::from_env(Env::default().default_filter_or(FILTER));
    builder.format_timestamp(None);
    if builder.try_init().is_ok() && !env_overrides() && !debug {
        log::set_max_level(LevelFilter::Warn);
    }
}

/// Raises verbosity to `debug` unless `RUST_LOG` chose a level.
pub fn enable_debug() {
    if !env_overrides() {
        log::set_max_level(LevelFilter::Debug);
    }
}
