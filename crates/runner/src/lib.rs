//! Meridian Runner
//!
//! Hosts one settlement engine behind a line-oriented JSON protocol:
//!
//! - **Config**: JSON file with engine settings and publisher identity
//! - **EngineHandle**: the exclusive lock every operation goes through
//! - **Session**: parses commands, drives the engine, publishes fills
//!
//! ```text
//!  stdin ──► Session::handle_line ──► EngineHandle ──► SettlementEngine
//!                    │                                      │
//!                    │ fills                                │
//!                    ▼                                      │
//!               Contributor ──► Transport ──► stream        │
//!                    ▲                                      │
//!  stdin ── ack ─────┘      stdout ◄── Response ◄───────────┘
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod handle;
pub mod session;

pub use command::{Command, Response};
pub use config::{
    ConfigError, IdStrategy, RunnerConfig, load_config, load_config_from_str, load_default_config,
};
pub use error::{RunnerError, RunnerResult};
pub use handle::EngineHandle;
pub use session::Session;
