// # Device Table
//
// The LLDP interface table of a device, and the semantics of applying
// commands to it. Shared by the in-memory and file-backed devices.
//
// ## Semantics
//
// - `set` creates the interface node on demand; `delete` on a missing node
//   is a no-op.
// - Location representations are independent nodes on the device; setting
//   one does not clear the others.
// - Coordinate deletes match key and value; civic deletes match the type
//   (and the value, when one is given).
// - Empty nodes are pruned. An interface with no location and no `disable`
//   flag carries no LLDP state and disappears from the table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::trace;

use crate::command::{Action, Command, Directive};
use crate::model::{CivicConfig, CivicEntry, ElinValue, InterfaceConfig, LocationConfig, Scalar};

/// LLDP interface table keyed by interface name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceTable {
    interfaces: BTreeMap<String, InterfaceConfig>,
}

impl DeviceTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from records, dropping those without LLDP state
    pub fn from_records(records: impl IntoIterator<Item = InterfaceConfig>) -> Self {
        let interfaces = records
            .into_iter()
            .filter_map(|mut record| {
                prune(&mut record);
                (!is_vacant(&record)).then(|| (record.name.clone(), record))
            })
            .collect();
        Self { interfaces }
    }

    /// Records ordered by interface name
    pub fn records(&self) -> Vec<InterfaceConfig> {
        self.interfaces.values().cloned().collect()
    }

    /// Look up one interface
    pub fn get(&self, name: &str) -> Option<&InterfaceConfig> {
        self.interfaces.get(name)
    }

    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }

    /// Apply commands in order
    pub fn apply_all<'a>(&mut self, commands: impl IntoIterator<Item = &'a Command>) {
        for command in commands {
            self.apply(command);
        }
    }

    /// Apply one command
    pub fn apply(&mut self, command: &Command) {
        let name = command.interface.as_str();

        match command.action {
            Action::Set => {
                let record = self
                    .interfaces
                    .entry(name.to_string())
                    .or_insert_with(|| InterfaceConfig::new(name));
                set(record, &command.directive);
            }
            Action::Delete => match self.interfaces.get_mut(name) {
                Some(record) => delete(record, &command.directive),
                None => {
                    trace!("Nothing to delete on {}", name);
                    return;
                }
            },
        }

        if let Some(record) = self.interfaces.get_mut(name) {
            prune(record);
            if is_vacant(record) {
                self.interfaces.remove(name);
            }
        }
    }
}

fn set(record: &mut InterfaceConfig, directive: &Directive) {
    match directive {
        Directive::Disable => record.enable = Some(false),
        Directive::Location => {
            location(record);
        }
        Directive::Coordinate { key, value } => {
            let location = location(record);
            location.civic_based = None;
            location.elin = None;
            location
                .coordinate_based
                .get_or_insert_with(BTreeMap::new)
                .insert(key.clone(), Scalar::Text(value.clone()));
        }
        Directive::CountryCode(code) => civic(record).country_code = Some(code.clone()),
        Directive::CivicAddress {
            ca_type,
            ca_value: Some(value),
        } => {
            let entry = CivicEntry::new(*ca_type, value.clone());
            let entries = &mut civic(record).ca_info;
            if !entries.contains(&entry) {
                entries.push(entry);
            }
        }
        Directive::CivicAddress { ca_value: None, .. } => {
            trace!("Ignoring civic address without value on {}", record.name);
        }
        Directive::Elin(elin) => {
            let location = location(record);
            location.coordinate_based = None;
            location.civic_based = None;
            location.elin = Some(ElinValue::Text(elin.to_string()));
        }
    }
}

fn delete(record: &mut InterfaceConfig, directive: &Directive) {
    match directive {
        Directive::Disable => record.enable = None,
        Directive::Location => record.location = None,
        Directive::Coordinate { key, value } => {
            if let Some(coordinate) = record
                .location
                .as_mut()
                .and_then(|l| l.coordinate_based.as_mut())
                && coordinate.get(key).is_some_and(|v| v.to_string() == *value)
            {
                coordinate.remove(key);
            }
        }
        Directive::CountryCode(_) => {
            if let Some(civic) = record.location.as_mut().and_then(|l| l.civic_based.as_mut()) {
                civic.country_code = None;
            }
        }
        Directive::CivicAddress { ca_type, ca_value } => {
            if let Some(civic) = record.location.as_mut().and_then(|l| l.civic_based.as_mut()) {
                civic.ca_info.retain(|entry| {
                    entry.ca_type != *ca_type
                        || ca_value.as_ref().is_some_and(|v| *v != entry.ca_value)
                });
            }
        }
        Directive::Elin(_) => {
            if let Some(location) = record.location.as_mut() {
                location.elin = None;
            }
        }
    }
}

fn location(record: &mut InterfaceConfig) -> &mut LocationConfig {
    record.location.get_or_insert_with(LocationConfig::default)
}

/// Civic subtree; a location holds one representation at a time
fn civic(record: &mut InterfaceConfig) -> &mut CivicConfig {
    let location = location(record);
    location.coordinate_based = None;
    location.elin = None;
    location.civic_based.get_or_insert_with(CivicConfig::default)
}

fn prune(record: &mut InterfaceConfig) {
    if let Some(location) = record.location.as_mut() {
        if location.coordinate_based.as_ref().is_some_and(BTreeMap::is_empty) {
            location.coordinate_based = None;
        }
        if location
            .civic_based
            .as_ref()
            .is_some_and(|c| c.country_code.is_none() && c.ca_info.is_empty())
        {
            location.civic_based = None;
        }
        if location.coordinate_based.is_none()
            && location.civic_based.is_none()
            && location.elin.is_none()
        {
            record.location = None;
        }
    }
}

fn is_vacant(record: &InterfaceConfig) -> bool {
    record.location.is_none() && record.enable != Some(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Elin;

    fn coordinate(key: &str, value: &str) -> Directive {
        Directive::Coordinate {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_set_creates_interface() {
        let mut table = DeviceTable::new();
        table.apply(&Command::set("eth0", coordinate("latitude", "40.0")));

        let record = table.get("eth0").unwrap();
        let location = record.location.as_ref().unwrap();
        assert_eq!(
            location.coordinate_based.as_ref().unwrap().get("latitude"),
            Some(&Scalar::from("40.0"))
        );
    }

    #[test]
    fn test_coordinate_delete_matches_value() {
        let mut table = DeviceTable::new();
        table.apply(&Command::set("eth0", coordinate("latitude", "40.0")));
        table.apply(&Command::delete("eth0", coordinate("latitude", "41.0")));
        assert_eq!(table.len(), 1);

        table.apply(&Command::delete("eth0", coordinate("latitude", "40.0")));
        assert!(table.is_empty());
    }

    #[test]
    fn test_civic_delete_by_type_removes_all_values() {
        let mut table = DeviceTable::new();
        for value in ["San Jose", "Milpitas"] {
            table.apply(&Command::set(
                "eth1",
                Directive::CivicAddress {
                    ca_type: 3,
                    ca_value: Some(value.to_string()),
                },
            ));
        }
        table.apply(&Command::set("eth1", Directive::CountryCode("US".to_string())));
        table.apply(&Command::delete(
            "eth1",
            Directive::CivicAddress {
                ca_type: 3,
                ca_value: None,
            },
        ));

        let civic = table.get("eth1").unwrap().location.as_ref().unwrap();
        assert!(civic.civic_based.as_ref().unwrap().ca_info.is_empty());
    }

    #[test]
    fn test_disable_keeps_interface_without_location() {
        let mut table = DeviceTable::new();
        table.apply(&Command::set("eth2", Directive::Disable));
        assert_eq!(table.get("eth2").unwrap().enable, Some(false));

        table.apply(&Command::delete("eth2", Directive::Disable));
        assert!(table.get("eth2").is_none());
    }

    #[test]
    fn test_delete_missing_interface_is_noop() {
        let mut table = DeviceTable::new();
        table.apply(&Command::delete("eth9", Directive::Location));
        assert!(table.is_empty());
    }

    #[test]
    fn test_from_records_drops_vacant() {
        let table = DeviceTable::from_records([
            InterfaceConfig::new("eth0").with_enable(true),
            InterfaceConfig::new("eth1").with_location(LocationConfig::elin(911)),
        ]);
        assert_eq!(table.len(), 1);
        assert!(table.get("eth1").is_some());
    }

    #[test]
    fn test_setting_a_variant_replaces_the_others() {
        let mut table = DeviceTable::new();
        table.apply(&Command::set("eth0", coordinate("latitude", "40.0")));
        table.apply(&Command::set("eth0", Directive::Elin(Elin::new(911).unwrap())));

        let location = table.get("eth0").unwrap().location.as_ref().unwrap();
        assert_eq!(location.populated(), vec!["elin"]);

        table.apply(&Command::set("eth0", Directive::CountryCode("US".to_string())));
        let location = table.get("eth0").unwrap().location.as_ref().unwrap();
        assert_eq!(location.populated(), vec!["civic_based"]);

        table.apply(&Command::set("eth0", coordinate("longitude", "10.0")));
        let location = table.get("eth0").unwrap().location.as_ref().unwrap();
        assert_eq!(location.populated(), vec!["coordinate_based"]);
        assert_eq!(location.coordinate_based.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn test_elin_stored_padded() {
        let mut table = DeviceTable::new();
        table.apply(&Command::set("eth0", Directive::Elin(Elin::new(7).unwrap())));
        let location = table.get("eth0").unwrap().location.as_ref().unwrap();
        assert_eq!(location.elin, Some(ElinValue::from("0000000007")));
    }
}
