use core::fmt;
use std::path::PathBuf;

/// Failure to load a sprite or sound at startup.
///
/// Always fatal: the frontend aborts before entering the frame loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetError {
    NotFound { path: PathBuf },
    Decode { path: PathBuf, reason: String },
}

impl AssetError {
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::NotFound { path } | Self::Decode { path, .. } => path,
        }
    }
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { path } => write!(f, "asset not found: {}", path.display()),
            Self::Decode { path, reason } => {
                write!(f, "failed to decode asset {}: {reason}", path.display())
            }
        }
    }
}

impl std::error::Error for AssetError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    Io { path: PathBuf, reason: String },
    Parse { reason: String },
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, reason } => {
                write!(f, "cannot read config {}: {reason}", path.display())
            }
            Self::Parse { reason } => write!(f, "malformed config: {reason}"),
            Self::Invalid { field, reason } => write!(f, "invalid config `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}
