//! Error types for the sequencer crate

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequencerError {
    #[error("Send failed: {0}")]
    Send(String),

    #[error("Channel closed")]
    ChannelClosed,
}

pub type SequencerResult<T> = std::result::Result<T, SequencerError>;
