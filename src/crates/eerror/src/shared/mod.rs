//! Shared utilities for encoding and decoding

pub mod string_utils;

pub use string_utils::*;
