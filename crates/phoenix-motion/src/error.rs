//! Motion layer errors

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MotionError {
    /// Config file could not be read
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Invalid loop config: {0}")]
    InvalidLoopConfig(String),
}
