pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{LocalFileSystem, MemoryFileSystem};
pub use crate::core::reorganizer::Reorganizer;
pub use utils::error::{LayerError, Result};
