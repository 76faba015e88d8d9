//! Core module - events, settings, and fundamental systems.
//!
//! This module provides the foundation that the rig and look systems build
//! upon.

mod data;
mod events;
mod plugin;

pub use data::*;
pub use events::*;
pub use plugin::CorePlugin;
