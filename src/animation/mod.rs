// Animation system module: clips, actions and the mixer that drives them

pub mod action;
pub mod interpolation;
pub mod mixer;
pub mod types;

pub use action::{Action, ActionState, LoopMode};
pub use mixer::{ActionId, Mixer};
pub use types::*;
