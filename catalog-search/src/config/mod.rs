//! Configuration module for the catalog search.
//! Reads settings from the environment and wires the components together.
mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::Settings;
