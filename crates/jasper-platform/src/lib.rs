//! FPGA platform descriptions for the jasper toolflow.
//!
//! A platform is a board + FPGA combination described by a YAML file in
//! `<root>/jasper_library/platforms/<name>.yaml`. Loading one yields a
//! [`Platform`] holding:
//! - **Identity:** name, FPGA part, backend target, manufacturer
//! - **Resources:** tags for what the board provides, used for DRC
//! - **Build inputs:** source and constraint file lists
//! - **Pins:** abstract pin names mapped to banks of physical [`Pin`]s

pub mod error;
pub mod parse;
pub mod pin;
pub mod platform;
pub mod root;

pub use error::{PlatformError, Result};
pub use parse::{discover_platforms, has_errors, validate_platform, Severity, ValidationIssue};
pub use pin::{Pin, PinLocs};
pub use platform::{Platform, DEFAULT_PIN_INDEX};
pub use root::{PlatformRoot, ROOT_ENV_VAR};
