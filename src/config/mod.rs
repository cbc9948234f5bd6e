//! Configuration module for veritium
//!
//! Settings come from the environment, optionally seeded from a `.env` file
//! by the binary before they are read.

pub mod settings;

pub use settings::{ConfigError, Settings};
