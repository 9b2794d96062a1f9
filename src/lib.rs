//! echo-sign: headless gloss animation player.
//!
//! Gloss names arrive as `echo-sign:play` messages, wait in a FIFO queue and
//! are played one at a time on an avatar, either from a GLB animation clip or,
//! when no clip is loaded for the gloss, as a short procedural arm wave.

pub mod animation;
pub mod asset;
pub mod error;
pub mod gloss;
pub mod model;
pub mod parser;
pub mod player;
pub mod protocol;
pub mod settings;

pub const CONFY_APP_NAME: &str = "echo-sign";
