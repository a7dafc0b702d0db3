use std::path::PathBuf;

use thiserror::Error;

/// Errors raised at the fallible edges: files, parsing, and name lookups.
///
/// Editor selection itself never fails; only opening, flushing, and
/// configuration loading can.
#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed preference file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("unknown editor '{0}' (expected 'legacy' or 'aztec')")]
    UnknownVariant(String),

    #[error("unknown build configuration '{0}'")]
    UnknownBuildConfiguration(String),
}

impl PrefsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, PrefsError>;
