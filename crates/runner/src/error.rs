//! Error types for the runner crate

use meridian_matching::EngineError;
use meridian_sequencer::SequencerError;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid command: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Sequencer error: {0}")]
    Sequencer(#[from] SequencerError),
}

pub type RunnerResult<T> = std::result::Result<T, RunnerError>;
