// Common utilities shared between user-facing macros
//
// This module contains:
// - parse_utils: `#[compose(...)]` attribute parsing

mod parse_utils;

pub use parse_utils::*;
