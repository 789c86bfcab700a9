//! Core types shared by the CLI and the library.
//!
//! Currently the configuration layer: slide geometry, snapshot settings and
//! deck defaults loaded from TOML.

mod config;

pub use config::{Config, DeckConfig, VersionsConfig, LOCAL_CONFIG_FILE};
