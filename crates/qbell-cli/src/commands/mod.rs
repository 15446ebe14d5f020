//! CLI command implementations.

pub mod common;
pub mod prepare;
pub mod run;
pub mod states;
pub mod version;
