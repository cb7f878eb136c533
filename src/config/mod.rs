//! Configuration for Zenny
//!
//! Resolves the base directory and loads user settings from `config.json`.

pub mod paths;
pub mod settings;

pub use paths::ZennyPaths;
pub use settings::Settings;
