//! Validation, discovery and export of platform definitions.
//!
//! Platform definitions are `.yaml` files in `jasper_library/platforms/`.
//! Loading lives on [`Platform`] itself; this module checks a loaded
//! platform for consistency, lists the definitions available under a root,
//! and renders a platform for display.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

use crate::error::Result;
use crate::platform::Platform;
use crate::root::{PlatformRoot, CONFIG_EXTENSION};

/// Backend compiler flows that downstream tooling knows how to drive.
pub const KNOWN_BACKENDS: &[&str] = &["vivado", "ise"];

/// How serious a [`ValidationIssue`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// A validation issue found in a platform definition.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
}

impl ValidationIssue {
    fn error(message: String) -> Self {
        ValidationIssue {
            severity: Severity::Error,
            message,
        }
    }

    fn warning(message: String) -> Self {
        ValidationIssue {
            severity: Severity::Warning,
            message,
        }
    }
}

/// Check a platform definition for consistency.
///
/// Returns `Ok(())` if nothing was found, or `Err(issues)` with every
/// problem (errors and warnings) in check order.
pub fn validate_platform(platform: &Platform) -> std::result::Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    // 1. FPGA part is set
    if platform.fpga().trim().is_empty() {
        issues.push(ValidationIssue::error("fpga part is empty".into()));
    }

    // 2. Backend is one we can drive
    if !KNOWN_BACKENDS.contains(&platform.backend_target()) {
        issues.push(ValidationIssue::warning(format!(
            "unknown backend_target '{}' (expected one of: {})",
            platform.backend_target(),
            KNOWN_BACKENDS.join(", ")
        )));
    }

    // 3. No physical location is claimed by two pins
    let mut owners: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for (bank, pins) in platform.pins() {
        for (i, pin) in pins.iter().enumerate() {
            if let Some(loc) = pin.loc() {
                owners.entry(loc).or_default().push(format!("{bank}[{i}]"));
            }
        }
    }
    for (loc, users) in &owners {
        if users.len() > 1 {
            issues.push(ValidationIssue::error(format!(
                "location {loc} is assigned to multiple pins: {}",
                users.join(", ")
            )));
        }
    }

    for (bank, pins) in platform.pins() {
        // 4. Every pin is placed
        let unplaced = pins.iter().filter(|p| p.loc().is_none()).count();
        if unplaced > 0 {
            issues.push(ValidationIssue::warning(format!(
                "pin '{bank}' has {unplaced} pin(s) without a location"
            )));
        }

        // 5. A bank uses one IO standard
        let standards: BTreeSet<Option<&str>> = pins.iter().map(|p| p.iostd()).collect();
        if standards.len() > 1 {
            let listed: Vec<&str> = standards.iter().map(|s| s.unwrap_or("<none>")).collect();
            issues.push(ValidationIssue::warning(format!(
                "pin '{bank}' mixes IO standards: {}",
                listed.join(", ")
            )));
        }
    }

    // 6. Provided resources are listed once
    let mut seen = BTreeSet::new();
    for tag in platform.provides() {
        if !seen.insert(tag.as_str()) {
            issues.push(ValidationIssue::warning(format!(
                "resource '{tag}' is provided more than once"
            )));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Whether a list of issues contains anything at error severity.
pub fn has_errors(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}

/// Serialize a platform to pretty TOML.
pub fn platform_to_toml(platform: &Platform) -> Result<String> {
    let toml_str = toml::to_string_pretty(platform)?;
    Ok(toml_str)
}

/// Serialize a platform to pretty JSON.
pub fn platform_to_json(platform: &Platform) -> Result<String> {
    let json = serde_json::to_string_pretty(platform)?;
    Ok(json)
}

/// Discover all platform definitions under a root.
///
/// Returns a list of (platform_name, file_path) pairs sorted by name.
pub fn discover_platforms(root: &PlatformRoot) -> Result<Vec<(String, PathBuf)>> {
    let platforms_dir = root.platforms_dir();
    if !platforms_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut platforms = Vec::new();
    for entry in std::fs::read_dir(&platforms_dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        if path.extension().and_then(|e| e.to_str()) != Some(CONFIG_EXTENSION) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            platforms.push((stem.to_string(), path.clone()));
        }
    }
    platforms.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(platforms)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_platform() -> Platform {
        let mut p = Platform::new("roach2", "xc6vsx475tff1759-1", "ise");
        p.add_pins("sysclk_p", Some("LVDS_25"), "AP11");
        p.add_pins("gpio", Some("LVCMOS15"), ["G31", "H31", "J31"]);
        p
    }

    fn messages(issues: &[ValidationIssue]) -> Vec<&str> {
        issues.iter().map(|i| i.message.as_str()).collect()
    }

    #[test]
    fn validate_clean() {
        assert!(validate_platform(&clean_platform()).is_ok());
    }

    #[test]
    fn validate_empty_fpga() {
        let p = Platform::new("x", "  ", "vivado");
        let issues = validate_platform(&p).unwrap_err();
        assert!(has_errors(&issues));
        assert!(messages(&issues).iter().any(|m| m.contains("fpga part is empty")));
    }

    #[test]
    fn validate_unknown_backend_is_warning() {
        let p = Platform::new("x", "xc7k160t", "quartus");
        let issues = validate_platform(&p).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert!(!has_errors(&issues));
    }

    #[test]
    fn validate_shared_location() {
        let mut p = clean_platform();
        p.add_pins("led", Some("LVCMOS15"), "H31");
        let issues = validate_platform(&p).unwrap_err();
        assert!(has_errors(&issues));
        assert!(messages(&issues)
            .iter()
            .any(|m| m.contains("H31") && m.contains("gpio[1]") && m.contains("led[0]")));
    }

    #[test]
    fn validate_unplaced_pin() {
        let mut p = clean_platform();
        p.add_pins("spare", Some("LVCMOS15"), None::<String>);
        let issues = validate_platform(&p).unwrap_err();
        assert!(!has_errors(&issues));
        assert!(messages(&issues).iter().any(|m| m.contains("without a location")));
    }

    #[test]
    fn validate_mixed_iostd() {
        let mut p = clean_platform();
        p.add_pins("gpio", Some("LVCMOS18"), "K31");
        let issues = validate_platform(&p).unwrap_err();
        assert!(messages(&issues).iter().any(|m| m.contains("mixes IO standards")));
    }

    #[test]
    fn validate_duplicate_provides() {
        let p = Platform::from_yaml_str(
            "name: x\nfpga: y\nbackend_target: vivado\nprovides: [adc, adc]\n",
        )
        .unwrap();
        let issues = validate_platform(&p).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("'adc'"));
        assert_eq!(p.provides().len(), 2);
    }

    #[test]
    fn toml_export() {
        let toml_str = platform_to_toml(&clean_platform()).unwrap();
        assert!(toml_str.contains("fpga = \"xc6vsx475tff1759-1\""));
        assert!(toml_str.contains("AP11"));
    }

    #[test]
    fn json_export() {
        let json = platform_to_json(&clean_platform()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["name"], "roach2");
        assert_eq!(value["pins"]["gpio"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn discover_platforms_finds_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let root = PlatformRoot::new(dir.path());
        std::fs::create_dir_all(root.platforms_dir()).unwrap();

        let body = "name: x\nfpga: y\nbackend_target: vivado\n";
        std::fs::write(root.platforms_dir().join("snap.yaml"), body).unwrap();
        std::fs::write(root.platforms_dir().join("roach2.yaml"), body).unwrap();
        // Non-.yaml file should be ignored
        std::fs::write(root.platforms_dir().join("README.md"), "ignore me").unwrap();

        let platforms = discover_platforms(&root).unwrap();
        assert_eq!(platforms.len(), 2);
        assert_eq!(platforms[0].0, "roach2");
        assert_eq!(platforms[1].0, "snap");
    }

    #[test]
    fn discover_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let platforms = discover_platforms(&PlatformRoot::new(dir.path())).unwrap();
        assert!(platforms.is_empty());
    }
}
