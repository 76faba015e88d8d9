//! Error types for rig setup and look requests.

use bevy::prelude::*;
use thiserror::Error;

/// Errors that can occur while setting up a rig or serving a look request.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RigError {
    /// No aim controller joints were found under the rig root.
    #[error("rig has no aim controller joints")]
    NoControllers,

    /// The requested look target does not exist or has no transform.
    #[error("look target {0:?} does not exist or has no transform")]
    InvalidTarget(Entity),

    /// A controller's source slot count was outside the legal {1, 2} range.
    #[error("controller {controller:?} has {count} source slots, expected 1 or 2")]
    MalformedSourceState { controller: Entity, count: usize },
}
