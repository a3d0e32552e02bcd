//! Error types for fusegen

use std::path::PathBuf;

use thiserror::Error;

/// Errors from profile loading and the fuse codec
#[derive(Debug, Error)]
pub enum FusegenError {
    /// Encoding, decoding or option parsing failed
    #[error(transparent)]
    Codec(#[from] fusegen_core::Error),

    /// Failed to read a profile file or directory
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML profile file could not be parsed
    #[error("Failed to parse TOML profiles: {0}")]
    Toml(#[from] toml::de::Error),

    /// Profiles could not be written as TOML
    #[error("Failed to serialize profiles: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// RON profile file could not be parsed
    #[error("Failed to parse RON profiles: {0}")]
    Ron(#[from] ron::error::SpannedError),

    /// File extension is neither `.toml` nor `.ron`
    #[error("Unsupported profile file {0} (expected .toml or .ron)")]
    UnsupportedFormat(PathBuf),

    /// No profile with the requested name
    #[error("Unknown profile: {0}")]
    UnknownProfile(String),

    /// Two profiles share a name
    #[error("Duplicate profile name: {0}")]
    DuplicateProfile(String),

    /// Profile option failed to resolve
    #[error("Profile '{name}': {source}")]
    InvalidProfile {
        name: String,
        #[source]
        source: fusegen_core::Error,
    },
}

/// Result type for fusegen operations
pub type Result<T> = std::result::Result<T, FusegenError>;
