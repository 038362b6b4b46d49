//! Error types for platform loading and pin lookup.

use std::path::PathBuf;

/// Errors that can occur while loading or querying a platform.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// No platform configuration file at the resolved path.
    #[error("couldn't find platform configuration file {}", path.display())]
    ConfigNotFound {
        /// The path that was resolved from the platform name.
        path: PathBuf,
    },

    /// A required top-level key is absent from the configuration.
    #[error("platform configuration is missing required field '{field}'")]
    MissingField {
        /// The on-disk key name (e.g. `backend_target`).
        field: &'static str,
    },

    /// Lookup of a pin bank that was never registered.
    #[error("no pin named {name}")]
    UnknownPin {
        /// The requested bank name.
        name: String,
    },

    /// At least one requested index lies outside the bank.
    #[error("pin named {name} does not have indices {indices:?}")]
    IndexOutOfRange {
        /// The bank name.
        name: String,
        /// The full set of indices that was requested.
        indices: Vec<usize>,
    },

    /// The environment variable holding the configuration root is unset.
    #[error("environment variable {var} is not set")]
    RootNotSet {
        /// Name of the variable.
        var: &'static str,
    },

    /// YAML deserialization error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML serialization error.
    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error reading configuration files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for platform operations.
pub type Result<T> = std::result::Result<T, PlatformError>;
