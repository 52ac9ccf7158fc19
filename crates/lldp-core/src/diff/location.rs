// # Location Variant Differ
//
// Compares the location of a desired interface against the observed one.
// The variant of the desired location decides which comparison runs; the
// observed location only contributes when it holds the same variant.
//
// ## Directions
//
// - Additive (`reconcile_location`): set commands for what the device lacks.
// - Deletion (`delete_stale_location`): delete commands for what the device
//   has and the desired record does not.
// - Purge (`purge_location`): drop the whole location subtree.
//
// ## Per-variant rules
//
// | Variant    | Additive                              | Deletion                                   |
// |------------|---------------------------------------|--------------------------------------------|
// | coordinate | keys whose value differs or is absent | `(key, value)` pairs absent from want      |
// | civic      | country code if changed, new entries  | entries absent from want, by type only     |
// | elin       | padded value if changed               | whole location if changed                  |
//
// When the observed interface does not hold the desired variant, the deletion
// direction removes the whole location instead of diffing sub-entries.

use std::collections::{BTreeMap, HashSet};

use crate::command::{Command, Directive};
use crate::model::{CivicEntry, Interface, Location};

/// Additive location commands for `want`, relative to `have`
pub fn reconcile_location(name: &str, want: &Interface, have: Option<&Interface>) -> Vec<Command> {
    let have_location = have.and_then(|h| h.location.as_ref());

    match &want.location {
        Some(Location::Coordinate(want_coordinate)) => {
            let empty = BTreeMap::new();
            let have_coordinate = have_location
                .and_then(Location::as_coordinate)
                .unwrap_or(&empty);
            add_coordinates(name, want_coordinate, have_coordinate)
        }
        Some(Location::Civic(want_civic)) => {
            let mut commands = Vec::new();
            let have_civic = have_location.and_then(Location::as_civic);
            if have_civic.is_none_or(|h| h.country_code != want_civic.country_code) {
                commands.push(Command::set(
                    name,
                    Directive::CountryCode(want_civic.country_code.clone()),
                ));
            }
            let have_entries = have_civic.map(|h| h.entries.as_slice()).unwrap_or_default();
            commands.extend(add_civic_addresses(name, &want_civic.entries, have_entries));
            commands
        }
        Some(Location::Elin(want_elin)) => {
            match have_location.and_then(Location::as_elin) {
                Some(have_elin) if have_elin == *want_elin => Vec::new(),
                _ => vec![Command::set(name, Directive::Elin(*want_elin))],
            }
        }
        None => Vec::new(),
    }
}

/// Deletion commands for location state `have` holds and `want` does not
pub fn delete_stale_location(name: &str, want: &Interface, have: &Interface) -> Vec<Command> {
    let have_location = have.location.as_ref();

    match &want.location {
        Some(Location::Coordinate(want_coordinate)) => {
            match have_location.and_then(Location::as_coordinate) {
                Some(have_coordinate) => remove_coordinates(name, want_coordinate, have_coordinate),
                None => vec![Command::delete(name, Directive::Location)],
            }
        }
        Some(Location::Civic(want_civic)) => match have_location.and_then(Location::as_civic) {
            Some(have_civic) => {
                remove_civic_addresses(name, &want_civic.entries, &have_civic.entries)
            }
            None => vec![Command::delete(name, Directive::Location)],
        },
        Some(Location::Elin(want_elin)) => match have_location.and_then(Location::as_elin) {
            Some(have_elin) if have_elin == *want_elin => Vec::new(),
            _ => vec![Command::delete(name, Directive::Location)],
        },
        None => purge_location(name, have.has_location()),
    }
}

/// Remove the whole location subtree when one is stored
pub fn purge_location(name: &str, has_location: bool) -> Vec<Command> {
    if has_location {
        vec![Command::delete(name, Directive::Location)]
    } else {
        Vec::new()
    }
}

fn add_coordinates(
    name: &str,
    want: &BTreeMap<String, String>,
    have: &BTreeMap<String, String>,
) -> Vec<Command> {
    want.iter()
        .filter(|(key, value)| have.get(*key) != Some(*value))
        .map(|(key, value)| {
            Command::set(
                name,
                Directive::Coordinate {
                    key: key.clone(),
                    value: value.clone(),
                },
            )
        })
        .collect()
}

fn remove_coordinates(
    name: &str,
    want: &BTreeMap<String, String>,
    have: &BTreeMap<String, String>,
) -> Vec<Command> {
    have.iter()
        .filter(|(key, value)| want.get(*key) != Some(*value))
        .map(|(key, value)| {
            Command::delete(
                name,
                Directive::Coordinate {
                    key: key.clone(),
                    value: value.clone(),
                },
            )
        })
        .collect()
}

/// Entries of `want` missing from `have`, keyed by `(ca_type, ca_value)`
pub fn add_civic_addresses(name: &str, want: &[CivicEntry], have: &[CivicEntry]) -> Vec<Command> {
    let have: HashSet<&CivicEntry> = have.iter().collect();
    want.iter()
        .filter(|entry| !have.contains(entry))
        .map(|entry| {
            Command::set(
                name,
                Directive::CivicAddress {
                    ca_type: entry.ca_type,
                    ca_value: Some(entry.ca_value.clone()),
                },
            )
        })
        .collect()
}

/// Entries of `have` missing from `want`, deleted by type only
///
/// Two stale entries sharing a type yield two identical deletes.
pub fn remove_civic_addresses(
    name: &str,
    want: &[CivicEntry],
    have: &[CivicEntry],
) -> Vec<Command> {
    let want: HashSet<&CivicEntry> = want.iter().collect();
    have.iter()
        .filter(|entry| !want.contains(entry))
        .map(|entry| {
            Command::delete(
                name,
                Directive::CivicAddress {
                    ca_type: entry.ca_type,
                    ca_value: None,
                },
            )
        })
        .collect()
}
