//! Outbound side of the network
//!
//! Inbound messages are handed to [`crate::Contributor::receive`] by
//! whoever owns the connection.

use tokio::sync::mpsc;

use crate::error::{SequencerError, SequencerResult};
use crate::message::Message;

/// Port for sending sequenced messages
pub trait Transport<T> {
    fn send(&mut self, message: Message<T>) -> SequencerResult<()>;
}

/// Tokio channel-based transport for single-process mode
///
/// Messages are passed directly to the receiving task without
/// serialization.
pub struct ChannelTransport<T> {
    tx: mpsc::UnboundedSender<Message<T>>,
}

impl<T> ChannelTransport<T> {
    pub fn new(tx: mpsc::UnboundedSender<Message<T>>) -> Self {
        Self { tx }
    }

    /// Create a transport and the receiver draining it
    pub fn pair() -> (Self, mpsc::UnboundedReceiver<Message<T>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl<T> Transport<T> for ChannelTransport<T> {
    fn send(&mut self, message: Message<T>) -> SequencerResult<()> {
        self.tx
            .send(message)
            .map_err(|_| SequencerError::ChannelClosed)
    }
}

/// Collects every sent message; handy for inspection
impl<T> Transport<T> for Vec<Message<T>> {
    fn send(&mut self, message: Message<T>) -> SequencerResult<()> {
        self.push(message);
        Ok(())
    }
}
