use colored::Colorize;
use std::str::FromStr;

/// Environment variable holding the minimum level that gets printed
pub const LOG_LEVEL_ENV: &str = "DEPS_BUILDER_LOG_LEVEL";

//Log utils
#[derive(PartialEq, PartialOrd, Debug, Clone, Copy)]
/// This enum is used to represent the different log levels
pub enum LogLevel {
    Debug,
    Info,
    Log,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Debug" | "debug" => Ok(LogLevel::Debug),
            "Info" | "info" => Ok(LogLevel::Info),
            "Log" | "log" => Ok(LogLevel::Log),
            "Warn" | "warn" => Ok(LogLevel::Warn),
            "Error" | "error" => Ok(LogLevel::Error),
            other => Err(format!("Unknown log level: {}", other)),
        }
    }
}

/// Returns the level configured through `DEPS_BUILDER_LOG_LEVEL`.
/// Unset or unparsable values fall back to `Log`.
pub fn current_level() -> LogLevel {
    std::env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|val| val.parse().ok())
        .unwrap_or(LogLevel::Log)
}

fn should_print(level: LogLevel, threshold: LogLevel) -> bool {
    if threshold == LogLevel::Debug {
        return true;
    }
    level >= threshold
}

/// This function is used to log messages to the console
/// # Arguments
/// * `level` - The log level of the message
/// * `message` - The message to log
/// # Example
/// ```
/// use deps_builder::utils::log::{log, LogLevel};
/// log(LogLevel::Info, "Hello World!");
/// log(LogLevel::Error, &format!("Something went wrong! {}", 42));
/// ```
///
/// # Level setting
/// The log level can be set by setting the environment variable `DEPS_BUILDER_LOG_LEVEL`
/// to one of the following values:
/// * `Debug`
/// * `Info`
/// * `Log`
/// * `Warn`
/// * `Error`
/// If the environment variable is not set, the default log level is `Log`
pub fn log(level: LogLevel, message: &str) {
    if !should_print(level, current_level()) {
        return;
    }
    let level_str = match level {
        LogLevel::Debug => "[DEBUG]".purple(),
        LogLevel::Info => "[INFO]".blue(),
        LogLevel::Log => "[LOG]".green(),
        LogLevel::Warn => "[WARN]".yellow(),
        LogLevel::Error => "[ERROR]".red(),
    };
    if level >= LogLevel::Warn {
        eprintln!("{} {}", level_str, message);
    } else {
        println!("{} {}", level_str, message);
    }
}
