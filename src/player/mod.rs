// Gloss player: playback queue, clip registry and the serial drain loop

pub mod fallback;
pub mod player;
pub mod queue;
pub mod registry;

pub use player::{PlaybackKind, Player, PlayerEvent};
