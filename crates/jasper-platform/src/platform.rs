//! FPGA platform model.
//!
//! A [`Platform`] is built in one step from a `<name>.yaml` file and answers
//! which pins, resources and build inputs a board has. The file is read into
//! an all-optional intermediate record and checked for required keys before
//! any `Platform` is produced, so a platform is either complete or not built.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{PlatformError, Result};
use crate::pin::{Pin, PinLocs};
use crate::root::PlatformRoot;

/// Index used when a caller asks for a bank's pin without naming one.
pub const DEFAULT_PIN_INDEX: usize = 0;

/// A named FPGA platform (board + device).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Platform {
    /// Platform name. Eg. ROACH2, SNAP, SKARAB.
    name: String,
    /// FPGA part, in the form passed to vendor tools. Eg. xc7k325tffg900-2.
    fpga: String,
    /// Selects which backend compiler flow is used.
    backend_target: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    manufacturer: String,
    /// Resources present on the board, for simple DRC. Eg. `qdr0`, `sysclk2x`.
    provides: Vec<String>,
    /// Source files/directories needed to compile the template top level
    /// (not including the top level itself).
    sources: Vec<String>,
    /// Constraint files/directories for the template top level.
    #[serde(rename = "constraints")]
    consts: Vec<String>,
    /// Abstract pin name to its ordered physical pins.
    pins: BTreeMap<String, Vec<Pin>>,
}

/// On-disk shape of a platform file. Everything is optional here; required
/// keys are checked in [`Platform::from_raw`].
#[derive(Debug, Default, Deserialize)]
struct RawPlatform {
    name: Option<String>,
    fpga: Option<String>,
    backend_target: Option<String>,
    manufacturer: Option<String>,
    provides: Option<Vec<String>>,
    sources: Option<Vec<String>>,
    constraints: Option<Vec<String>>,
    pins: Option<BTreeMap<String, RawPin>>,
}

#[derive(Debug, Deserialize)]
struct RawPin {
    #[serde(default)]
    iostd: Option<String>,
    #[serde(default)]
    loc: PinLocs,
}

fn required(value: Option<String>, field: &'static str) -> Result<String> {
    value.ok_or(PlatformError::MissingField { field })
}

impl Platform {
    /// Create an empty platform with only the required identifiers set.
    ///
    /// Useful for platforms assembled in code; pins are then registered
    /// with [`Platform::add_pins`].
    pub fn new(
        name: impl Into<String>,
        fpga: impl Into<String>,
        backend_target: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            fpga: fpga.into(),
            backend_target: backend_target.into(),
            manufacturer: String::new(),
            provides: Vec::new(),
            sources: Vec::new(),
            consts: Vec::new(),
            pins: BTreeMap::new(),
        }
    }

    /// Load the platform called `name` from `<root>/jasper_library/platforms/<name>.yaml`.
    ///
    /// The name is lowercased to find the file; the platform's own `name`
    /// comes from the file contents.
    pub fn load(root: &PlatformRoot, name: &str) -> Result<Self> {
        let path = root.config_path(name);
        debug!(platform = name, path = %path.display(), "resolving platform configuration");
        Self::from_path(&path)
    }

    /// Load a platform from an explicit YAML file.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(PlatformError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Parse a platform from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let raw: RawPlatform = if yaml.trim().is_empty() {
            RawPlatform::default()
        } else {
            serde_yaml::from_str(yaml)?
        };
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawPlatform) -> Result<Self> {
        let mut platform = Self {
            name: required(raw.name, "name")?,
            fpga: required(raw.fpga, "fpga")?,
            backend_target: required(raw.backend_target, "backend_target")?,
            manufacturer: raw.manufacturer.unwrap_or_default(),
            provides: raw.provides.unwrap_or_default(),
            sources: raw.sources.unwrap_or_default(),
            consts: raw.constraints.unwrap_or_default(),
            pins: BTreeMap::new(),
        };

        for (bank, pin) in raw.pins.unwrap_or_default() {
            platform.add_pins(bank, pin.iostd.as_deref(), pin.loc);
        }

        info!(
            platform = %platform.name,
            fpga = %platform.fpga,
            banks = platform.pins.len(),
            "loaded platform"
        );
        Ok(platform)
    }

    /// Append pins to the bank `name`, creating it if absent.
    ///
    /// One [`Pin`] is added per location, in order, all sharing `iostd`.
    /// Existing pins in the bank are kept. An empty location list adds
    /// nothing and does not create the bank, so every bank holds at least
    /// one pin.
    pub fn add_pins(
        &mut self,
        name: impl Into<String>,
        iostd: Option<&str>,
        locs: impl Into<PinLocs>,
    ) {
        let name = name.into();
        let locations = locs.into().into_locations();
        if locations.is_empty() {
            debug!(bank = %name, "no locations given, bank not registered");
            return;
        }

        let bank = self.pins.entry(name.clone()).or_default();
        let before = bank.len();
        bank.extend(
            locations
                .into_iter()
                .map(|loc| Pin::new(iostd.map(str::to_string), loc)),
        );
        debug!(
            bank = %name,
            added = bank.len() - before,
            total = bank.len(),
            "registered pins"
        );
    }

    /// Pins of bank `name` at each of `indices`, in request order.
    pub fn get_pins(&self, name: &str, indices: &[usize]) -> Result<Vec<&Pin>> {
        let bank = self.bank(name)?;
        indices
            .iter()
            .map(|&i| {
                bank.get(i).ok_or_else(|| PlatformError::IndexOutOfRange {
                    name: name.to_string(),
                    indices: indices.to_vec(),
                })
            })
            .collect()
    }

    /// Pin of bank `name` at `index`.
    pub fn get_pin(&self, name: &str, index: usize) -> Result<&Pin> {
        self.bank(name)?
            .get(index)
            .ok_or_else(|| PlatformError::IndexOutOfRange {
                name: name.to_string(),
                indices: vec![index],
            })
    }

    /// Pin of bank `name` at [`DEFAULT_PIN_INDEX`]. For single-pin banks this
    /// is the pin.
    pub fn pin(&self, name: &str) -> Result<&Pin> {
        self.get_pin(name, DEFAULT_PIN_INDEX)
    }

    fn bank(&self, name: &str) -> Result<&[Pin]> {
        self.pins
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| PlatformError::UnknownPin {
                name: name.to_string(),
            })
    }

    /// Number of pins in bank `name`, or `None` if there is no such bank.
    pub fn bank_len(&self, name: &str) -> Option<usize> {
        self.pins.get(name).map(Vec::len)
    }

    /// Registered bank names, sorted.
    pub fn pin_names(&self) -> impl Iterator<Item = &str> {
        self.pins.keys().map(String::as_str)
    }

    /// The full pin table.
    pub fn pins(&self) -> &BTreeMap<String, Vec<Pin>> {
        &self.pins
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fpga(&self) -> &str {
        &self.fpga
    }

    pub fn backend_target(&self) -> &str {
        &self.backend_target
    }

    /// FPGA manufacturer, if the file names one.
    pub fn manufacturer(&self) -> Option<&str> {
        (!self.manufacturer.is_empty()).then_some(self.manufacturer.as_str())
    }

    pub fn provides(&self) -> &[String] {
        &self.provides
    }

    /// Whether the board lists `tag` among its provided resources.
    pub fn provides_resource(&self, tag: &str) -> bool {
        self.provides.iter().any(|p| p == tag)
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn consts(&self) -> &[String] {
        &self.consts
    }
}
