#![forbid(unsafe_code)]

//! Unified error type for split hosts.
//!
//! Library layers return their own narrow errors (`SplitConfigError`,
//! `SplitOptionsError`, ...). Hosts usually only need to decide what to do
//! next, so [`Error`] wraps them all and maps each onto a [`Recovery`].

use std::fmt;

use vsplit_layout::{SplitConfigError, SplitOptionsError};
use vsplit_runtime::SplitBuildError;

#[cfg(feature = "config-file")]
use vsplit_layout::ConfigLoadError;

/// What a host should do after an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recovery {
    /// Fall back to `SplitConfig::default()` / default options and go on.
    UseDefaults,
    /// Drop the offending input and keep running.
    DropInput,
    /// Restore the terminal and exit.
    Shutdown,
}

/// Top-level error type for split hosts.
#[derive(Debug)]
pub enum Error {
    /// Configuration value out of range.
    Config(SplitConfigError),
    /// Accessory options rejected.
    Options(SplitOptionsError),
    /// Configuration file could not be read or parsed.
    #[cfg(feature = "config-file")]
    Load(ConfigLoadError),
    /// Terminal session could not be set up or torn down.
    Terminal(String),
    /// I/O failure while talking to the terminal.
    Io(std::io::Error),
}

impl Error {
    #[must_use]
    pub fn recovery(&self) -> Recovery {
        match self {
            Self::Config(_) | Self::Options(_) => Recovery::UseDefaults,
            #[cfg(feature = "config-file")]
            Self::Load(_) => Recovery::UseDefaults,
            Self::Io(err) if err.kind() == std::io::ErrorKind::Interrupted => Recovery::DropInput,
            Self::Terminal(_) | Self::Io(_) => Recovery::Shutdown,
        }
    }

    /// Short machine-readable category, for log fields.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Options(_) => "options",
            #[cfg(feature = "config-file")]
            Self::Load(_) => "config_load",
            Self::Terminal(_) => "terminal",
            Self::Io(_) => "io",
        }
    }

    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        self.recovery() != Recovery::Shutdown
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid split config: {err}"),
            Self::Options(err) => write!(f, "invalid split options: {err}"),
            #[cfg(feature = "config-file")]
            Self::Load(err) => write!(f, "{err}"),
            Self::Terminal(msg) => write!(f, "terminal: {msg}"),
            Self::Io(err) => write!(f, "I/O: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Options(err) => Some(err),
            #[cfg(feature = "config-file")]
            Self::Load(err) => Some(err),
            Self::Terminal(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<SplitConfigError> for Error {
    fn from(err: SplitConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<SplitOptionsError> for Error {
    fn from(err: SplitOptionsError) -> Self {
        Self::Options(err)
    }
}

impl From<SplitBuildError> for Error {
    fn from(err: SplitBuildError) -> Self {
        match err {
            SplitBuildError::Config(e) => Self::Config(e),
            SplitBuildError::Options(e) => Self::Options(e),
        }
    }
}

#[cfg(feature = "config-file")]
impl From<ConfigLoadError> for Error {
    fn from(err: ConfigLoadError) -> Self {
        match err {
            ConfigLoadError::Invalid(e) => Self::Config(e),
            other => Self::Load(other),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

/// Standard result type for vsplit hosts.
pub type Result<T> = std::result::Result<T, Error>;
