// ============================================================================
// vidframes-cli/src/logging.rs
// ============================================================================
//
// LOGGING SETUP: Console and Optional File Logging
//
// Without --log-dir the CLI installs env_logger on stderr. With --log-dir it
// installs fern instead, writing the same records to stderr and to
// `vidframes_<command>_<YYYYMMDD_HHMMSS>.log` with ANSI codes stripped.
//
// USAGE:
// - RUST_LOG=info (default): Normal operation logs
// - RUST_LOG=debug or -v: Engine command lines and per-frame details

use crate::error::{CliErrorContext, CliResult};
use log::LevelFilter;
use owo_colors::OwoColorize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use vidframes_core::CoreError;

/// Returns the current local timestamp formatted as "YYYYMMDD_HHMMSS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Log file name for a run of `command` started now.
pub fn log_file_name(command: &str) -> String {
    format!("vidframes_{}_{}.log", command, get_timestamp())
}

fn level_label(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "ERROR",
        log::Level::Warn => "WARN ",
        log::Level::Info => "INFO ",
        log::Level::Debug => "DEBUG",
        log::Level::Trace => "TRACE",
    }
}

/// Installs the global logger.
///
/// Returns the log file path when `log_dir` is given.
pub fn init_logging(
    verbose: bool,
    log_dir: Option<&Path>,
    command: &str,
) -> CliResult<Option<PathBuf>> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    match log_dir {
        None => {
            init_console_logger(if verbose { "debug" } else { "info" });
            Ok(None)
        }
        Some(dir) => init_file_logger(level, dir, command).map(Some),
    }
}

fn init_console_logger(default_filter: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format(|buf, record| {
            let label = level_label(record.level());
            let colored = match record.level() {
                log::Level::Error => label.bright_red().to_string(),
                log::Level::Warn => label.yellow().to_string(),
                log::Level::Info => label.green().to_string(),
                log::Level::Debug => label.blue().to_string(),
                log::Level::Trace => label.magenta().to_string(),
            };
            writeln!(
                buf,
                "{} {} {}",
                chrono::Local::now().format("%H:%M:%S").dimmed(),
                colored,
                record.args()
            )
        })
        .init();
}

fn init_file_logger(level: LevelFilter, dir: &Path, command: &str) -> CliResult<PathBuf> {
    fs::create_dir_all(dir)
        .cli_with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let log_path = dir.join(log_file_name(command));
    let log_file = fern::log_file(&log_path)
        .cli_with_context(|| format!("Failed to create log file {}", log_path.display()))?;

    let console = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} {} {}",
                chrono::Local::now().format("%H:%M:%S"),
                level_label(record.level()),
                message
            ))
        })
        .chain(std::io::stderr());

    let file = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}][{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                level_label(record.level()).trim_end(),
                record.target(),
                strip_ansi_escapes::strip_str(message.to_string())
            ))
        })
        .chain(log_file);

    fern::Dispatch::new()
        .level(level)
        .level_for("ffmpeg_sidecar", LevelFilter::Warn)
        .chain(console)
        .chain(file)
        .apply()
        .map_err(|e| CoreError::OperationFailed(format!("Failed to install logger: {e}")))?;

    Ok(log_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_name_shape() {
        let name = log_file_name("batch");
        assert!(name.starts_with("vidframes_batch_"));
        assert!(name.ends_with(".log"));
        // vidframes_batch_ + YYYYMMDD_HHMMSS + .log
        assert_eq!(name.len(), "vidframes_batch_".len() + 15 + ".log".len());
    }
}
