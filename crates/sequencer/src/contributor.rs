use std::collections::VecDeque;

use meridian_core::{SeqNo, Sequence};

use crate::error::SequencerResult;
use crate::message::Message;
use crate::transport::Transport;

/// Publishing endpoint of a sequenced topic
///
/// Every published payload is kept until the stream shows it landed. A
/// message received from another publisher with a sequence number beyond
/// the expected one means our in-flight payloads lost their slots, so the
/// whole queue is re-sent with fresh numbers starting after it.
pub struct Contributor<P, X> {
    transport: X,
    publisher: String,
    topic: String,
    sequence: Sequence,
    pending: VecDeque<P>,
}

impl<P: Clone, X: Transport<P>> Contributor<P, X> {
    pub fn new(transport: X, publisher: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            transport,
            publisher: publisher.into(),
            topic: topic.into(),
            sequence: Sequence::new(),
            pending: VecDeque::new(),
        }
    }

    pub fn publisher(&self) -> &str {
        &self.publisher
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Last sequence number observed on the stream
    pub fn last_seq_no(&self) -> SeqNo {
        self.sequence.current()
    }

    /// Number of payloads not yet acknowledged
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn transport(&self) -> &X {
        &self.transport
    }

    /// Send `payload` with the slot after everything already in flight
    ///
    /// The payload stays queued even if the transport fails, so a later
    /// resend can still deliver it.
    pub fn publish(&mut self, payload: P) -> SequencerResult<SeqNo> {
        let seq_no = self.sequence.next() + self.pending.len() as SeqNo;
        let message = self.prepare(payload.clone(), seq_no);
        self.pending.push_back(payload);
        self.transport.send(message)?;
        Ok(seq_no)
    }

    /// Process a message observed on the stream and hand it back
    pub fn receive<R>(&mut self, message: Message<R>) -> SequencerResult<Message<R>> {
        let out_of_sequence =
            message.publisher != self.publisher && message.seq_no > self.sequence.next();

        self.sequence.set(message.seq_no);

        if out_of_sequence {
            log::debug!(
                "{} behind stream at {}, resending {} message(s)",
                self.publisher,
                message.seq_no,
                self.pending.len()
            );
            self.resend()?;
        } else {
            self.pending.pop_front();
        }

        Ok(message)
    }

    fn resend(&mut self) -> SequencerResult<()> {
        let start = self.sequence.next();
        for (idx, payload) in self.pending.iter().enumerate() {
            let message = self.prepare(payload.clone(), start + idx as SeqNo);
            self.transport.send(message)?;
        }
        Ok(())
    }

    fn prepare(&self, payload: P, seq_no: SeqNo) -> Message<P> {
        Message::publish(self.publisher.clone(), self.topic.clone(), seq_no, payload)
    }
}
