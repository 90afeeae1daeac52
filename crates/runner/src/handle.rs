use std::sync::Arc;

use meridian_matching::SettlementEngine;
use tokio::sync::{Mutex, MutexGuard};

/// Shared access to one engine
///
/// Every operation, reads included, takes the same exclusive lock, so a
/// settlement pass never interleaves with a submission or a query.
#[derive(Clone)]
pub struct EngineHandle {
    inner: Arc<Mutex<SettlementEngine>>,
}

impl EngineHandle {
    pub fn new(engine: SettlementEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, SettlementEngine> {
        self.inner.lock().await
    }
}
