pub mod glb;
pub mod load;

pub use load::{load_avatar, load_clip};
