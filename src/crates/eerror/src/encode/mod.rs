//! Enhanced error encoding module

pub mod formatter;
pub mod map;

pub use formatter::*;
pub use map::*;
