mod config;
mod reader;

pub use config::*;
pub use reader::*;
