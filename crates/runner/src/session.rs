//! Command dispatch for one client stream

use log::{debug, warn};
use meridian_core::Fill;
use meridian_sequencer::{Contributor, Transport};
use serde_json::{Value, json};

use crate::command::{Command, Response};
use crate::error::RunnerResult;
use crate::handle::EngineHandle;

/// Drives the engine from parsed commands and publishes every fill
pub struct Session<X> {
    engine: EngineHandle,
    contributor: Contributor<Fill, X>,
}

impl<X: Transport<Fill>> Session<X> {
    pub fn new(engine: EngineHandle, contributor: Contributor<Fill, X>) -> Self {
        Self {
            engine,
            contributor,
        }
    }

    pub fn engine(&self) -> &EngineHandle {
        &self.engine
    }

    pub fn contributor(&self) -> &Contributor<Fill, X> {
        &self.contributor
    }

    /// Parse and execute one input line
    pub async fn handle_line(&mut self, line: &str) -> Response {
        match serde_json::from_str::<Command>(line) {
            Ok(command) => self.execute(command).await,
            Err(e) => {
                warn!("Unparseable command: {}", e);
                Response::failure(format!("Invalid command: {e}"))
            }
        }
    }

    pub async fn execute(&mut self, command: Command) -> Response {
        debug!("Executing {:?}", command);
        match self.dispatch(command).await {
            Ok(data) => Response::Success { data },
            Err(e) => {
                warn!("Command failed: {}", e);
                Response::failure(e)
            }
        }
    }

    async fn dispatch(&mut self, command: Command) -> RunnerResult<Value> {
        let data = match command {
            Command::Submit { order } => {
                serde_json::to_value(self.engine.lock().await.submit_order(order))?
            }
            Command::SubmitSequenced { seq_no, order } => {
                serde_json::to_value(self.engine.lock().await.submit_sequenced(seq_no, order)?)?
            }
            Command::Cancel { id } => {
                Value::String(self.engine.lock().await.cancel_order(&id)?)
            }
            Command::Settle => {
                let fills = self.engine.lock().await.settle();
                self.publish(&fills);
                serde_json::to_value(fills)?
            }
            Command::Spread => serde_json::to_value(self.engine.lock().await.spread())?,
            Command::BestBid => serde_json::to_value(self.engine.lock().await.best_bid())?,
            Command::BestAsk => serde_json::to_value(self.engine.lock().await.best_ask())?,
            Command::Depth => serde_json::to_value(self.engine.lock().await.depth())?,
            Command::Order { id } => serde_json::to_value(self.engine.lock().await.order(&id))?,
            Command::Ack { message } => {
                let message = self.contributor.receive(message)?;
                json!({
                    "seq_no": message.seq_no,
                    "pending": self.contributor.pending(),
                })
            }
        };
        Ok(data)
    }

    /// Failed sends stay in the resend queue, so settlement still succeeds
    fn publish(&mut self, fills: &[Fill]) {
        for fill in fills {
            if let Err(e) = self.contributor.publish(fill.clone()) {
                warn!("Failed to publish fill for {}: {}", fill.id, e);
            }
        }
    }
}
