mod chunk;
mod common;
mod document;

pub use chunk::*;
pub use common::*;
pub use document::*;
