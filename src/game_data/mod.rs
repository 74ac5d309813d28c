//! The read-only game-data snapshot: ships, their modules, and the
//! ammunition and aircraft records those modules reference by name.

pub mod keys;
pub mod provider;
pub mod types;

pub use keys::ComponentType;
pub use provider::{GameDataProvider, GameDataStore};
pub use types::*;
