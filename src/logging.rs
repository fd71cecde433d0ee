//! Logging setup for albumsync.
//!
//! Uses the `log` facade with an `env_logger` backend. `RUST_LOG` replaces
//! the CLI-derived filter entirely when set. Otherwise `-q` shows errors
//! only, `-v` enables debug and `-vv` trace for albumsync's own modules,
//! while dependencies stay at warn.
//!
//! ```rust,no_run
//! use albumsync::logging::init_logging;
//!
//! init_logging(1, false);
//! log::debug!("visible at -v");
//! ```

use env_logger::{Builder, Env};
use log::{LevelFilter, SetLoggerError};
use std::io::Write;

const CRATE_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Initialize logging from the CLI verbosity flags.
///
/// A logger installed earlier in the process is kept; the failure is
/// reported at debug level.
pub fn init_logging(verbose: u8, quiet: bool) {
    if let Err(e) = try_init_logging(verbose, quiet) {
        log::debug!("Logger already installed: {}", e);
    }
}

/// Initialize logging, failing if a global logger is already set.
///
/// # Errors
///
/// Returns [`SetLoggerError`] if another logger was installed first.
pub fn try_init_logging(verbose: u8, quiet: bool) -> Result<(), SetLoggerError> {
    let mut builder = Builder::new();
    let level = crate_level(verbose, quiet);

    let from_env = std::env::var_os("RUST_LOG").is_some();
    if from_env {
        builder.parse_env(Env::new().filter("RUST_LOG"));
    } else {
        builder
            .filter_level(LevelFilter::Warn.min(level))
            .filter_module(CRATE_TARGET, level);
    }

    configure_format(&mut builder, verbose);
    builder.try_init()?;

    log::debug!(
        "Logging initialized ({}), max level {}",
        if from_env { "RUST_LOG" } else { "CLI flags" },
        log::max_level()
    );
    Ok(())
}

/// Level for albumsync's own modules. `quiet` wins over `verbose`.
fn crate_level(verbose: u8, quiet: bool) -> LevelFilter {
    match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    }
}

/// Module path relative to the crate root, e.g. `replicate::copy`.
fn short_target(target: &str) -> &str {
    target
        .strip_prefix(CRATE_TARGET)
        .map(|rest| rest.trim_start_matches("::"))
        .filter(|rest| !rest.is_empty())
        .unwrap_or(target)
}

fn configure_format(builder: &mut Builder, verbose: u8) {
    let show_target = verbose >= 1;

    #[cfg(debug_assertions)]
    builder.format(move |buf, record| {
        let style = buf.default_level_style(record.level());
        write!(
            buf,
            "{} {style}{:<5}{style:#} ",
            buf.timestamp_seconds(),
            record.level()
        )?;
        if show_target {
            write!(buf, "[{}] ", short_target(record.target()))?;
        }
        writeln!(buf, "{}", record.args())
    });

    #[cfg(not(debug_assertions))]
    builder.format(move |buf, record| {
        let style = buf.default_level_style(record.level());
        write!(buf, "{style}{:<5}{style:#} ", record.level())?;
        if show_target {
            write!(buf, "[{}] ", short_target(record.target()))?;
        }
        writeln!(buf, "{}", record.args())
    });
}
