use polyfold::engine::config::ConfigError;
use polyfold::engine::error::EngineError;
use polyfold::workflows::replay::ReplayError;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Edit script failed: {0}")]
    Replay(#[from] ReplayError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to write file '{path}': {source}", path = path.display())]
    FileWriting {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl CliError {
    pub fn parsing(path: &Path, source: impl Into<anyhow::Error>) -> Self {
        CliError::FileParsing {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    pub fn writing(path: &Path, source: impl Into<anyhow::Error>) -> Self {
        CliError::FileWriting {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }
}
