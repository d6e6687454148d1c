mod audio;
mod video;
mod script;
mod metadata;

pub use audio::*;
pub use video::*;
pub use script::*;
pub use metadata::*;
