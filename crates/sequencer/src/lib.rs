//! Meridian Sequencer
//!
//! Ordered, at-least-once delivery between publishers and subscribers.
//! Each publication carries a sequence number; payloads stay in a resend
//! queue until acknowledged, and are re-sent with fresh sequence numbers
//! when another publisher's message shows the stream moved ahead.
//!
//! The matching core does not depend on this crate; the runner uses it to
//! publish fills.

pub mod contributor;
pub mod error;
pub mod message;
pub mod transport;

pub use contributor::Contributor;
pub use error::{SequencerError, SequencerResult};
pub use message::{Message, MessageKind};
pub use transport::{ChannelTransport, Transport};
