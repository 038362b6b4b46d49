//! Physical pins and the location forms accepted when registering them.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

/// A single FPGA pin: IO standard plus physical location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Pin {
    iostd: Option<String>,
    loc: Option<String>,
}

impl Pin {
    /// Create a pin. `iostd` is e.g. `"LVDS"`, `loc` a package pin such as `"A21"`.
    pub fn new(iostd: Option<String>, loc: Option<String>) -> Self {
        Self { iostd, loc }
    }

    /// IO standard, if one was given.
    pub fn iostd(&self) -> Option<&str> {
        self.iostd.as_deref()
    }

    /// Physical location, if one was given.
    pub fn loc(&self) -> Option<&str> {
        self.loc.as_deref()
    }
}

/// The `loc` of a pin entry: nothing, one location, or a bank of locations.
///
/// Locations are read from any YAML scalar, so `loc: 12` is the location
/// `"12"`. Nested sequences and mappings are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PinLocs {
    /// No location given. Registers a single pin without a `loc`.
    #[default]
    Unplaced,
    /// One physical location.
    Single(String),
    /// Ordered locations of a multi-pin bank.
    Bank(Vec<String>),
}

impl PinLocs {
    /// Expand into the ordered per-pin locations.
    pub fn into_locations(self) -> Vec<Option<String>> {
        match self {
            PinLocs::Unplaced => vec![None],
            PinLocs::Single(loc) => vec![Some(loc)],
            PinLocs::Bank(locs) => locs.into_iter().map(Some).collect(),
        }
    }
}

impl<'de> Deserialize<'de> for PinLocs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(PinLocs::Unplaced),
            Value::Sequence(items) => items
                .into_iter()
                .map(scalar_location)
                .collect::<Result<Vec<_>, _>>()
                .map(PinLocs::Bank)
                .map_err(D::Error::custom),
            other => scalar_location(other)
                .map(PinLocs::Single)
                .map_err(D::Error::custom),
        }
    }
}

fn scalar_location(value: Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(format!("pin location must be a scalar, found {other:?}")),
    }
}

impl From<&str> for PinLocs {
    fn from(loc: &str) -> Self {
        PinLocs::Single(loc.to_string())
    }
}

impl From<String> for PinLocs {
    fn from(loc: String) -> Self {
        PinLocs::Single(loc)
    }
}

impl From<Vec<String>> for PinLocs {
    fn from(locs: Vec<String>) -> Self {
        PinLocs::Bank(locs)
    }
}

impl From<Vec<&str>> for PinLocs {
    fn from(locs: Vec<&str>) -> Self {
        PinLocs::Bank(locs.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for PinLocs {
    fn from(locs: [&str; N]) -> Self {
        PinLocs::Bank(locs.iter().map(|l| l.to_string()).collect())
    }
}

impl From<Option<String>> for PinLocs {
    fn from(loc: Option<String>) -> Self {
        loc.map_or(PinLocs::Unplaced, PinLocs::Single)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_expands_to_one() {
        let locs = PinLocs::from("AC12").into_locations();
        assert_eq!(locs, vec![Some("AC12".to_string())]);
    }

    #[test]
    fn bank_keeps_order() {
        let locs = PinLocs::from(["A3", "A1", "A2"]).into_locations();
        assert_eq!(
            locs,
            vec![Some("A3".into()), Some("A1".into()), Some("A2".into())]
        );
    }

    #[test]
    fn unplaced_yields_single_empty_location() {
        assert_eq!(PinLocs::Unplaced.into_locations(), vec![None]);
        assert_eq!(PinLocs::from(None::<String>), PinLocs::Unplaced);
    }

    #[test]
    fn deserialize_scalar_and_list() {
        let single: PinLocs = serde_yaml::from_str("AB7").unwrap();
        assert_eq!(single, PinLocs::Single("AB7".into()));

        let bank: PinLocs = serde_yaml::from_str("[AB7, AB8]").unwrap();
        assert_eq!(bank, PinLocs::Bank(vec!["AB7".into(), "AB8".into()]));

        let null: PinLocs = serde_yaml::from_str("~").unwrap();
        assert_eq!(null, PinLocs::Unplaced);
    }

    #[test]
    fn deserialize_numeric_scalars() {
        let single: PinLocs = serde_yaml::from_str("12").unwrap();
        assert_eq!(single, PinLocs::Single("12".into()));

        let bank: PinLocs = serde_yaml::from_str("[7, A8]").unwrap();
        assert_eq!(bank, PinLocs::Bank(vec!["7".into(), "A8".into()]));
    }

    #[test]
    fn deserialize_empty_list_expands_to_nothing() {
        let bank: PinLocs = serde_yaml::from_str("[]").unwrap();
        assert_eq!(bank, PinLocs::Bank(Vec::new()));
        assert!(bank.into_locations().is_empty());
    }

    #[test]
    fn deserialize_rejects_nested_values() {
        assert!(serde_yaml::from_str::<PinLocs>("[[A1, A2]]").is_err());
        assert!(serde_yaml::from_str::<PinLocs>("{pin: A1}").is_err());
    }

    #[test]
    fn pin_accessors() {
        let pin = Pin::new(Some("LVCMOS18".into()), None);
        assert_eq!(pin.iostd(), Some("LVCMOS18"));
        assert_eq!(pin.loc(), None);
    }
}
