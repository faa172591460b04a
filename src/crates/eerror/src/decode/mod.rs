//! Enhanced error decoding module

pub mod literals;
pub mod parser;
pub mod scanner;

pub use parser::parse_parts;
