//! CLI library for testing purposes

pub mod config;
pub mod inputs;
pub mod validation;

pub use config::{CatConfig, Config};
pub use inputs::{InputSource, resolve_inputs};
