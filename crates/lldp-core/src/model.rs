//! Interface and location types
//!
//! Records arrive in their serialized shape ([`InterfaceConfig`]), where the
//! three location representations are independent optional fields. Before
//! any diffing they are normalized into [`Interface`], whose [`Location`] is a
//! tagged enum holding exactly one variant.
//!
//! Desired records are normalized strictly: more than one populated variant,
//! or a civic variant without a country code, is rejected. Observed records
//! come from the device and are normalized by priority
//! (coordinate, then civic, then elin).

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Largest ELIN that fits in ten digits
pub const ELIN_MAX: u64 = 9_999_999_999;

/// Reconciliation policy selected by the caller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Add desired state on top of what the device has
    #[default]
    Merged,
    /// Make each named interface match its desired record exactly
    Replaced,
    /// Replace every named interface and strip all others
    Overridden,
    /// Remove LLDP state from the named (or all) interfaces
    Deleted,
}

impl Policy {
    /// Policy name as it appears in configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::Merged => "merged",
            Policy::Replaced => "replaced",
            Policy::Overridden => "overridden",
            Policy::Deleted => "deleted",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "merged" => Ok(Policy::Merged),
            "replaced" => Ok(Policy::Replaced),
            "overridden" => Ok(Policy::Overridden),
            "deleted" => Ok(Policy::Deleted),
            other => Err(Error::config(format!(
                "unknown state '{}' (expected merged, replaced, overridden or deleted)",
                other
            ))),
        }
    }
}

/// One LLDP interface record as supplied by the caller or the fact provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterfaceConfig {
    /// Interface name (e.g., "eth0")
    pub name: String,

    /// Whether LLDP is active on the interface
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable: Option<bool>,

    /// Physical location advertised on the interface
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationConfig>,
}

impl InterfaceConfig {
    /// Create a record with only a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enable: None,
            location: None,
        }
    }

    /// Set the enable flag
    pub fn with_enable(mut self, enable: bool) -> Self {
        self.enable = Some(enable);
        self
    }

    /// Set the location
    pub fn with_location(mut self, location: LocationConfig) -> Self {
        self.location = Some(location);
        self
    }
}

/// Serialized location: each representation is an independent field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Coordinate attributes (latitude, longitude, altitude, datum, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate_based: Option<BTreeMap<String, Scalar>>,

    /// Civic address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub civic_based: Option<CivicConfig>,

    /// Emergency location identifier number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elin: Option<ElinValue>,
}

impl LocationConfig {
    /// Coordinate-based location from key/value pairs
    pub fn coordinate<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Scalar>,
    {
        Self {
            coordinate_based: Some(
                pairs
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    /// Civic-based location
    pub fn civic(country_code: impl Into<String>, ca_info: Vec<CivicEntry>) -> Self {
        Self {
            civic_based: Some(CivicConfig {
                country_code: Some(country_code.into()),
                ca_info,
            }),
            ..Self::default()
        }
    }

    /// ELIN location
    pub fn elin(value: impl Into<ElinValue>) -> Self {
        Self {
            elin: Some(value.into()),
            ..Self::default()
        }
    }

    /// Names of the populated representations, in priority order
    pub fn populated(&self) -> Vec<&'static str> {
        let mut variants = Vec::new();
        if self.coordinate_based.as_ref().is_some_and(|c| !c.is_empty()) {
            variants.push("coordinate_based");
        }
        if self.civic_based.as_ref().is_some_and(|c| !c.is_empty()) {
            variants.push("civic_based");
        }
        if self.elin.is_some() {
            variants.push("elin");
        }
        variants
    }

    /// True when no representation is populated
    pub fn is_empty(&self) -> bool {
        self.populated().is_empty()
    }
}

/// Serialized civic address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CivicConfig {
    /// Two-letter country code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,

    /// Typed address components
    #[serde(default)]
    pub ca_info: Vec<CivicEntry>,
}

impl CivicConfig {
    fn is_empty(&self) -> bool {
        self.country_code.is_none() && self.ca_info.is_empty()
    }
}

/// One civic address component, keyed by the exact `(ca_type, ca_value)` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CivicEntry {
    /// Civic address type code
    pub ca_type: u32,
    /// Component value
    pub ca_value: String,
}

impl CivicEntry {
    pub fn new(ca_type: u32, ca_value: impl Into<String>) -> Self {
        Self {
            ca_type,
            ca_value: ca_value.into(),
        }
    }
}

/// Scalar coordinate value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Integer(i) => write!(f, "{}", i),
            // Debug keeps the fractional part of whole floats ("40.0")
            Scalar::Float(x) => write!(f, "{:?}", x),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

/// Serialized ELIN, either a JSON number or a digit string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ElinValue {
    Number(i64),
    Text(String),
}

impl From<i64> for ElinValue {
    fn from(value: i64) -> Self {
        ElinValue::Number(value)
    }
}

impl From<&str> for ElinValue {
    fn from(value: &str) -> Self {
        ElinValue::Text(value.to_string())
    }
}

impl From<String> for ElinValue {
    fn from(value: String) -> Self {
        ElinValue::Text(value)
    }
}

/// Canonical ELIN: compared numerically, rendered as ten zero-padded digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Elin(u64);

impl Elin {
    /// Build an ELIN from its numeric value
    pub fn new(value: u64) -> Option<Self> {
        (value <= ELIN_MAX).then_some(Self(value))
    }

    /// Numeric value
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Coerce a serialized value, attaching `interface` to any error
    pub fn parse(interface: &str, raw: &ElinValue) -> Result<Self> {
        let value = match raw {
            ElinValue::Number(n) => u64::try_from(*n).map_err(|_| {
                Error::invalid_value(interface, format!("elin {} is negative", n))
            })?,
            ElinValue::Text(s) => {
                let digits = s.trim();
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(Error::invalid_value(
                        interface,
                        format!("elin '{}' is not a number", s),
                    ));
                }
                if digits.len() > 10 {
                    return Err(Error::invalid_value(
                        interface,
                        format!("elin '{}' is longer than 10 digits", s),
                    ));
                }
                digits.parse::<u64>().map_err(|_| {
                    Error::invalid_value(interface, format!("elin '{}' is out of range", s))
                })?
            }
        };

        Self::new(value).ok_or_else(|| {
            Error::invalid_value(
                interface,
                format!("elin {} does not fit in 10 digits", value),
            )
        })
    }
}

impl fmt::Display for Elin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:010}", self.0)
    }
}

/// Normalized civic address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CivicLocation {
    pub country_code: String,
    pub entries: Vec<CivicEntry>,
}

/// Normalized location with exactly one active representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Coordinate attributes, values in rendered form
    Coordinate(BTreeMap<String, String>),
    Civic(CivicLocation),
    Elin(Elin),
}

impl Location {
    pub fn as_coordinate(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            Location::Coordinate(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_civic(&self) -> Option<&CivicLocation> {
        match self {
            Location::Civic(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_elin(&self) -> Option<Elin> {
        match self {
            Location::Elin(e) => Some(*e),
            _ => None,
        }
    }
}

/// Normalized interface record used by the differs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    pub name: String,
    pub enable: Option<bool>,
    pub location: Option<Location>,
}

impl Interface {
    /// Normalize a desired-state record, rejecting ambiguous locations
    pub fn from_desired(config: &InterfaceConfig) -> Result<Self> {
        if config.name.trim().is_empty() {
            return Err(Error::validation(
                config.name.clone(),
                "interface name cannot be empty",
            ));
        }

        let location = match &config.location {
            Some(location) => {
                let populated = location.populated();
                if populated.len() > 1 {
                    return Err(Error::validation(
                        config.name.clone(),
                        format!(
                            "location sets more than one representation: {}",
                            populated.join(", ")
                        ),
                    ));
                }
                if let Some(civic) = &location.civic_based
                    && populated == ["civic_based"]
                    && civic.country_code.as_deref().is_none_or(|cc| cc.trim().is_empty())
                {
                    return Err(Error::validation(
                        config.name.clone(),
                        "civic_based location requires country_code",
                    ));
                }
                if let Some(civic) = &location.civic_based {
                    let mut seen = HashSet::new();
                    if let Some(entry) = civic.ca_info.iter().find(|entry| !seen.insert(*entry)) {
                        return Err(Error::validation(
                            config.name.clone(),
                            format!(
                                "civic address ca_type {} ca_value '{}' is listed more than once",
                                entry.ca_type, entry.ca_value
                            ),
                        ));
                    }
                }
                Self::normalize_location(&config.name, location)?
            }
            None => None,
        };

        Ok(Self {
            name: config.name.clone(),
            enable: config.enable,
            location,
        })
    }

    /// Normalize an observed record, selecting the location by priority
    pub fn from_observed(config: &InterfaceConfig) -> Result<Self> {
        let location = match &config.location {
            Some(location) => Self::normalize_location(&config.name, location)?,
            None => None,
        };

        Ok(Self {
            name: config.name.clone(),
            enable: config.enable,
            location,
        })
    }

    /// Enable flag with absence resolved to `default`
    pub fn enabled(&self, default: bool) -> bool {
        self.enable.unwrap_or(default)
    }

    /// Whether any location representation is stored
    pub fn has_location(&self) -> bool {
        self.location.is_some()
    }

    fn normalize_location(name: &str, location: &LocationConfig) -> Result<Option<Location>> {
        if let Some(coordinate) = &location.coordinate_based
            && !coordinate.is_empty()
        {
            return Ok(Some(Location::Coordinate(
                coordinate
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_string()))
                    .collect(),
            )));
        }

        if let Some(civic) = &location.civic_based
            && !civic.is_empty()
        {
            return Ok(Some(Location::Civic(CivicLocation {
                country_code: civic.country_code.clone().unwrap_or_default(),
                entries: civic.ca_info.clone(),
            })));
        }

        if let Some(elin) = &location.elin {
            return Ok(Some(Location::Elin(Elin::parse(name, elin)?)));
        }

        Ok(None)
    }
}
