mod utils;
mod format;
mod amf;
mod payload;
mod tag;
mod reader;

// Re-export commonly used types at crate root
pub use utils::*;
pub use format::*;
pub use amf::*;

// Payload decoders
pub use payload::*;

// Framing and reading
pub use tag::*;
pub use reader::*;
