// src/config/mod.rs

//! Task configuration for bob.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk (`loader.rs`).
//! - Validate that task names and types are usable as log paths (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, load_from_str, DEFAULT_CONFIG_FILE};
pub use model::{CommandConfig, ConfigFile, ConfigSection, RawConfigFile};
