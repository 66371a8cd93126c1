//! Error types for thesis collection and assembly

use std::path::PathBuf;

use thiserror::Error;

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur during collection and assembly
#[derive(Error, Debug)]
pub enum CoreError {
    /// Paper directory does not exist
    #[error("paper directory not found: {0}")]
    PaperDirNotFound(PathBuf),

    /// An explicitly requested config file does not exist
    #[error("config file not found: {0}")]
    ConfigNotFound(PathBuf),

    /// Config file failed to parse
    #[error("failed to parse config: {0}")]
    Config(#[from] toml::de::Error),

    /// Front matter failed to serialize
    #[error("failed to serialize front matter: {0}")]
    FrontMatter(#[from] serde_yaml::Error),

    /// Invalid glob pattern
    #[error("glob pattern error: {0}")]
    Pattern(#[from] glob::PatternError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
