//! CLI command implementations

pub mod expand;
pub mod hash;
pub mod json_output;
pub mod library;
pub mod validate;

mod reporting;
