//! Rig module - aim controllers, rig state, and discovery.

mod components;
mod discovery;
mod error;
mod plugin;

pub use components::*;
pub use discovery::setup_rigs;
pub use error::RigError;
pub use plugin::{RigPlugin, RigSetupSet};
