//! Location of platform configuration files.
//!
//! Platform definitions live under a library checkout:
//! ```text
//! <root>/
//!   jasper_library/
//!     platforms/
//!       <name>.yaml
//! ```
//!
//! The root is always passed explicitly. [`PlatformRoot::from_env`] is the
//! only place that consults the process environment.

use std::path::{Path, PathBuf};

use crate::error::{PlatformError, Result};

/// Environment variable holding the library checkout root.
pub const ROOT_ENV_VAR: &str = "MLIB_DEVEL_PATH";

/// Extension of platform configuration files.
pub const CONFIG_EXTENSION: &str = "yaml";

/// Root directory that platform configuration files are resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformRoot {
    root: PathBuf,
}

impl PlatformRoot {
    /// Use the given directory as the root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        PlatformRoot { root: root.into() }
    }

    /// Read the root from `MLIB_DEVEL_PATH`.
    pub fn from_env() -> Result<Self> {
        std::env::var_os(ROOT_ENV_VAR)
            .map(PlatformRoot::new)
            .ok_or(PlatformError::RootNotSet { var: ROOT_ENV_VAR })
    }

    /// The root directory itself.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Directory holding the `<name>.yaml` files.
    pub fn platforms_dir(&self) -> PathBuf {
        self.root.join("jasper_library").join("platforms")
    }

    /// Configuration file for a platform. The name is lowercased.
    pub fn config_path(&self, name: &str) -> PathBuf {
        self.platforms_dir()
            .join(format!("{}.{CONFIG_EXTENSION}", name.to_lowercase()))
    }
}
