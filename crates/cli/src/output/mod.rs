//! Output formatting

pub mod json;
pub mod terminal;
