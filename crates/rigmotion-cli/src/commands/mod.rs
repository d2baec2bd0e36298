//! CLI command implementations

pub mod bind;
pub mod json_output;
pub mod simulate;
pub mod validate;

mod reporting;
