//! Configuration types for the LLDP reconciliation system
//!
//! This module defines all configuration structures used throughout the crate.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::model::{InterfaceConfig, Policy};

/// Parameters of one module run: desired records, policy and device
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// Reconciliation policy
    #[serde(default)]
    pub state: Policy,

    /// Desired interface records
    #[serde(default)]
    pub config: Vec<InterfaceConfig>,

    /// Compute and stage commands without committing them
    #[serde(default)]
    pub check_mode: bool,

    /// Device the commands are applied to
    #[serde(default)]
    pub device: DeviceConfig,

    /// Engine settings
    #[serde(default)]
    pub engine: EngineConfig,
}

impl ModuleConfig {
    /// Create a configuration for the given policy and desired records
    pub fn new(state: Policy, config: Vec<InterfaceConfig>) -> Self {
        Self {
            state,
            config,
            ..Self::default()
        }
    }

    /// Stage commands without committing
    pub fn with_check_mode(mut self, check_mode: bool) -> Self {
        self.check_mode = check_mode;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        let mut seen = HashSet::new();
        for interface in &self.config {
            if interface.name.trim().is_empty() {
                return Err(crate::Error::config("Interface name cannot be empty"));
            }
            if !seen.insert(interface.name.as_str()) {
                return Err(crate::Error::validation(
                    interface.name.clone(),
                    "interface is listed more than once",
                ));
            }
        }

        self.device.validate()?;
        self.engine.syntax.validate()?;

        Ok(())
    }
}

/// Device backend configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeviceConfig {
    /// JSON file holding the device's LLDP interface table
    File {
        /// Path to the device file
        path: String,
    },

    /// In-memory device, starts empty (not persistent)
    #[default]
    Memory,
}

impl DeviceConfig {
    /// Validate the device configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            DeviceConfig::File { path } if path.is_empty() => {
                Err(crate::Error::config("Device file path cannot be empty"))
            }
            _ => Ok(()),
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Command syntax of the target device
    #[serde(default)]
    pub syntax: CommandSyntax,

    /// Value an absent `enable` flag stands for
    ///
    /// The device treats an interface without a `disable` directive as
    /// enabled, so the default is `true`.
    #[serde(default = "default_enable")]
    pub enable_default: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            syntax: CommandSyntax::default(),
            enable_default: default_enable(),
        }
    }
}

fn default_enable() -> bool {
    true
}

/// Keywords used to render commands for the target device
///
/// Defaults to the VyOS `service lldp interface` tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandSyntax {
    /// Prefix of every set command, up to the interface name
    pub set_prefix: String,
    /// Prefix of every delete command, up to the interface name
    pub delete_prefix: String,
    pub disable: String,
    pub location: String,
    pub coordinate_based: String,
    pub civic_based: String,
    pub country_code: String,
    pub ca_type: String,
    pub ca_value: String,
    pub elin: String,
}

impl CommandSyntax {
    /// Validate the syntax table
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.set_prefix.trim().is_empty() || self.delete_prefix.trim().is_empty() {
            return Err(crate::Error::config("Command prefixes cannot be empty"));
        }
        Ok(())
    }
}

impl Default for CommandSyntax {
    fn default() -> Self {
        Self {
            set_prefix: "set service lldp interface".to_string(),
            delete_prefix: "delete service lldp interface".to_string(),
            disable: "disable".to_string(),
            location: "location".to_string(),
            coordinate_based: "coordinate-based".to_string(),
            civic_based: "civic-based".to_string(),
            country_code: "country-code".to_string(),
            ca_type: "ca-type".to_string(),
            ca_value: "ca-value".to_string(),
            elin: "elin".to_string(),
        }
    }
}
