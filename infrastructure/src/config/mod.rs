//! Configuration loading and validation

mod file_config;
mod loader;

pub use file_config::{ConfigIssue, FileConfig, FileLlmConfig, FileStorageConfig, Severity};
pub use loader::ConfigLoader;
