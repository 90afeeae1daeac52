//! Runner configuration
//!
//! JSON file with the engine settings plus the identity used when
//! publishing fills.

mod loader;

pub use loader::{ConfigError, load_config, load_config_from_str, load_default_config};

use meridian_matching::{EngineConfig, SequentialIdGenerator, SettlementEngine, UuidIdGenerator};
use serde::{Deserialize, Serialize};

/// Order id strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    #[default]
    Uuid,
    /// "1", "2", ... for reproducible sessions
    Sequential,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Traded instrument, informational only
    pub symbol: String,
    /// Publisher name on the fill stream
    pub publisher: String,
    pub topic: String,
    #[serde(default)]
    pub ids: IdStrategy,
    #[serde(default)]
    pub engine: EngineConfig,
}

impl RunnerConfig {
    /// Build a fresh engine from this configuration
    pub fn build_engine(&self) -> SettlementEngine {
        match self.ids {
            IdStrategy::Uuid => SettlementEngine::new(self.engine.clone(), UuidIdGenerator),
            IdStrategy::Sequential => {
                SettlementEngine::new(self.engine.clone(), SequentialIdGenerator::new())
            }
        }
    }
}
