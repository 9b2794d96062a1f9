pub mod loader;
pub mod start_load;

pub use loader::AssetBase;
pub use start_load::{abandon_unfinished_loads, start_avatar_load, start_clip_loads};
