//! Test doubles and common utilities for contract tests
//!
//! This module provides record builders and minimal collaborators that
//! count calls, so tests can verify what reached the device boundary.

#![allow(dead_code)]

use lldp_core::command::Command;
use lldp_core::error::{Error, Result};
use lldp_core::model::{CivicEntry, InterfaceConfig, LocationConfig, Policy};
use lldp_core::traits::{ApplyOutcome, ConfigApplier, FactProvider};
use lldp_core::{EngineConfig, ReconcileEngine};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Interface with an elin location
pub fn elin(name: &str, value: impl Into<lldp_core::model::ElinValue>) -> InterfaceConfig {
    InterfaceConfig::new(name).with_location(LocationConfig::elin(value))
}

/// Interface with a civic location
pub fn civic(name: &str, country_code: &str, entries: &[(u32, &str)]) -> InterfaceConfig {
    let entries = entries
        .iter()
        .map(|(ca_type, ca_value)| CivicEntry::new(*ca_type, *ca_value))
        .collect();
    InterfaceConfig::new(name).with_location(LocationConfig::civic(country_code, entries))
}

/// Interface with a coordinate location
pub fn coordinate(name: &str, pairs: &[(&str, &str)]) -> InterfaceConfig {
    InterfaceConfig::new(name)
        .with_location(LocationConfig::coordinate(pairs.iter().copied()))
}

/// Rendered commands from the default engine
pub fn reconcile(
    policy: Policy,
    desired: &[InterfaceConfig],
    observed: &[InterfaceConfig],
) -> Vec<String> {
    ReconcileEngine::new(EngineConfig::default())
        .reconcile_rendered(policy, desired, observed)
        .expect("reconcile succeeds")
}

/// A fact provider returning a fixed record list
pub struct StaticFactProvider {
    records: Vec<InterfaceConfig>,
    /// Call counter for gather()
    gather_call_count: Arc<AtomicUsize>,
    fail: bool,
}

impl StaticFactProvider {
    pub fn new(records: Vec<InterfaceConfig>) -> Self {
        Self {
            records,
            gather_call_count: Arc::new(AtomicUsize::new(0)),
            fail: false,
        }
    }

    /// A provider whose gather() always fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new())
        }
    }

    /// Get the number of times gather() was called
    pub fn gather_call_count(&self) -> usize {
        self.gather_call_count.load(Ordering::SeqCst)
    }

    /// Create a provider that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            records: other.records.clone(),
            gather_call_count: Arc::clone(&other.gather_call_count),
            fail: other.fail,
        }
    }
}

#[async_trait::async_trait]
impl FactProvider for StaticFactProvider {
    async fn gather(&self) -> Result<Vec<InterfaceConfig>> {
        self.gather_call_count.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::device("device unreachable"));
        }
        Ok(self.records.clone())
    }

    fn provider_name(&self) -> &'static str {
        "static"
    }
}

/// A mock ConfigApplier that records every call
pub struct RecordingApplier {
    /// Call counter for apply()
    apply_call_count: Arc<AtomicUsize>,
    /// Commit flag and commands of each call
    calls: Arc<Mutex<Vec<(bool, Vec<Command>)>>>,
    fail: bool,
}

impl RecordingApplier {
    pub fn new() -> Self {
        Self {
            apply_call_count: Arc::new(AtomicUsize::new(0)),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// An applier whose apply() always fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Get the number of times apply() was called
    pub fn apply_call_count(&self) -> usize {
        self.apply_call_count.load(Ordering::SeqCst)
    }

    /// Get the recorded calls
    pub fn calls(&self) -> Vec<(bool, Vec<Command>)> {
        self.calls.lock().unwrap().clone()
    }

    /// Create an applier that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            apply_call_count: Arc::clone(&other.apply_call_count),
            calls: Arc::clone(&other.calls),
            fail: other.fail,
        }
    }
}

#[async_trait::async_trait]
impl ConfigApplier for RecordingApplier {
    async fn apply(&self, commands: &[Command], commit: bool) -> Result<ApplyOutcome> {
        self.apply_call_count.fetch_add(1, Ordering::SeqCst);
        self.calls
            .lock()
            .unwrap()
            .push((commit, commands.to_vec()));

        if self.fail {
            return Err(Error::device("commit rejected"));
        }
        Ok(ApplyOutcome {
            committed: commit,
            diff: Some(format!("{} line(s)", commands.len())),
        })
    }

    fn applier_name(&self) -> &'static str {
        "recording"
    }
}
