//! Look module - proximity trigger, weight fade, and target blend.

mod blend;
mod components;
mod fade;
mod plugin;
mod proximity;

pub use blend::{handle_look_requests, tick_target_blends};
pub use components::*;
pub use fade::tick_weight_fades;
pub use plugin::LookPlugin;
pub use proximity::proximity_trigger;
