use meridian_core::SeqNo;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MessageKind {
    Publish,
    Ack,
}

/// Tagged envelope exchanged over the network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message<T> {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub publisher: String,
    pub topic: String,
    pub seq_no: SeqNo,
    #[serde(rename = "message")]
    pub payload: T,
}

impl<T> Message<T> {
    pub fn publish(
        publisher: impl Into<String>,
        topic: impl Into<String>,
        seq_no: SeqNo,
        payload: T,
    ) -> Self {
        Self {
            kind: MessageKind::Publish,
            publisher: publisher.into(),
            topic: topic.into(),
            seq_no,
            payload,
        }
    }

    pub fn ack(
        publisher: impl Into<String>,
        topic: impl Into<String>,
        seq_no: SeqNo,
        payload: T,
    ) -> Self {
        Self {
            kind: MessageKind::Ack,
            ..Self::publish(publisher, topic, seq_no, payload)
        }
    }
}
