mod constants;
mod header;

pub use constants::*;
pub use header::*;
