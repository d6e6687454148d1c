mod buffer;
mod error;
mod source;

pub use buffer::*;
pub use error::*;
pub use source::*;
