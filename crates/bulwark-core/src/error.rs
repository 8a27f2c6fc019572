//! Composition errors.

use std::path::PathBuf;

use thiserror::Error;

/// Settings that cannot produce a playable session.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no player definitions configured")]
    NoPlayerDefinitions,

    #[error("ability pool has {available} entries, {required} choices are offered per level")]
    AbilityPoolTooSmall { available: usize, required: usize },

    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
