//! Meridian Ports
//!
//! Port definitions (traits) for the Meridian matching engine.
//! These define the boundaries between the matching core and its
//! collaborators.

mod error;
mod ids;

pub use error::{EngineError, EngineResult};
pub use ids::IdGenerator;
