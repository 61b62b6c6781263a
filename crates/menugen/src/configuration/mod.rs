//! Configuration management for the generator.
//!
//! Defaults, an optional TOML file, and command-line flags are layered into one
//! process-wide key/value store.

mod config;

pub use config::*;
