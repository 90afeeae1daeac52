//! Line protocol
//!
//! One JSON object per line in, one per line out:
//!
//! ```text
//! {"op":"submit","order":{"type":"limit","side":"BID","quantity":"1","price":"10"}}
//! {"status":"success","data":{"id":"...","seq_no":1,...}}
//! ```

use meridian_core::{Fill, OrderId, OrderRequest, SeqNo};
use meridian_sequencer::Message;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Submit {
        order: OrderRequest,
    },
    SubmitSequenced {
        seq_no: SeqNo,
        order: OrderRequest,
    },
    Cancel {
        id: OrderId,
    },
    Settle,
    Spread,
    BestBid,
    BestAsk,
    Depth,
    Order {
        id: OrderId,
    },
    /// Message observed on the fill stream
    Ack {
        message: Message<Fill>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Response {
    Success { data: Value },
    Failure { message: String },
}

impl Response {
    pub fn success(data: impl Serialize) -> Self {
        match serde_json::to_value(data) {
            Ok(data) => Response::Success { data },
            Err(e) => Response::failure(e),
        }
    }

    pub fn failure(message: impl ToString) -> Self {
        Response::Failure {
            message: message.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success { .. })
    }

    /// Single-line JSON rendering
    pub fn to_line(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"status":"failure","message":"unserializable response"}"#.into())
    }
}
