//! Error types shared by builders, the orchestrator and config loading.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Kinds of failure a builder step can report.
/// Success is represented by `Ok(())`, not by a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    IoError,
    /// An external tool could not be started or exited non-zero
    BuildToolError,
    HeaderNotFound,
    LinkedDepNotFound,
    FileMissing,
    FileCopyFailed,
    /// Declared for completeness, no step currently produces it
    FileExistsWarning,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::IoError => "IO_ERROR",
            ErrorKind::BuildToolError => "BUILD_TOOL_ERROR",
            ErrorKind::HeaderNotFound => "HEADER_NOT_FOUND",
            ErrorKind::LinkedDepNotFound => "LINKED_DEP_NOT_FOUND",
            ErrorKind::FileMissing => "FILE_MISSING",
            ErrorKind::FileCopyFailed => "FILE_COPY_FAILED",
            ErrorKind::FileExistsWarning => "FILE_EXISTS_WARNING",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Failure of a single builder operation
#[derive(Debug, Error)]
#[error("[{}]: {message}", .name.to_uppercase())]
pub struct BuildError {
    pub kind: ErrorKind,
    pub name: String,
    pub message: String,
}

impl BuildError {
    pub fn new(kind: ErrorKind, name: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.to_string(),
            message: message.into(),
        }
    }
}

pub type BuildResult<T = ()> = Result<T, BuildError>;

/// Which builder operation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Prepare,
    Build,
    Clean,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Prepare => "prepare build",
            Phase::Build => "execute build",
            Phase::Clean => "execute clean",
        };
        write!(f, "{}", s)
    }
}

/// A builder failure that aborted the whole run
#[derive(Debug, Error)]
#[error("[{}]: failed to {phase}", .library.to_uppercase())]
pub struct RunError {
    pub library: String,
    pub phase: Phase,
    #[source]
    pub source: BuildError,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Could not determine the global config directory")]
    NoConfigDir,

    #[error("Invalid parameter `{0}`. See `deps_builder config --help` for more info")]
    UnknownParameter(String),

    #[error("Invalid value `{value}` for `{parameter}`: {reason}")]
    InvalidValue {
        parameter: String,
        value: String,
        reason: String,
    },
}
