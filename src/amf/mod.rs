mod amf0;
mod decoder;

pub use amf0::*;
pub use decoder::*;
