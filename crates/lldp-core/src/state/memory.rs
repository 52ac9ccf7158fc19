// # Memory Device
//
// In-memory device implementing both FactProvider and ConfigApplier.
//
// ## Purpose
//
// Holds an LLDP interface table and applies command lists to it with device
// semantics (see `state::table`). Useful for testing, for embedding the
// engine, and for computing commands against a fresh device.
//
// ## Crash Behavior
//
// - All state is lost on restart
// - Nothing is persisted

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::Error;
use crate::command::{Command, render_all};
use crate::config::CommandSyntax;
use crate::model::InterfaceConfig;
use crate::state::DeviceTable;
use crate::traits::{ApplyOutcome, ConfigApplier, FactProvider};

/// In-memory device implementation
///
/// Clones share the same table, so one clone can serve as the fact provider
/// and another as the applier.
///
/// # Example
///
/// ```rust,no_run
/// use lldp_core::state::MemoryDevice;
/// use lldp_core::model::{InterfaceConfig, LocationConfig};
/// use lldp_core::traits::FactProvider;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let device = MemoryDevice::with_records(vec![
///         InterfaceConfig::new("eth0").with_location(LocationConfig::elin(911)),
///     ]);
///
///     let facts = device.gather().await?;
///     assert_eq!(facts.len(), 1);
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryDevice {
    inner: Arc<RwLock<DeviceTable>>,
    syntax: CommandSyntax,
}

impl MemoryDevice {
    /// Create an empty device
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a device seeded with interface records
    pub fn with_records(records: Vec<InterfaceConfig>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(DeviceTable::from_records(records))),
            syntax: CommandSyntax::default(),
        }
    }

    /// Use `syntax` when rendering diffs
    pub fn with_syntax(mut self, syntax: CommandSyntax) -> Self {
        self.syntax = syntax;
        self
    }

    /// Current records, ordered by name
    pub async fn records(&self) -> Vec<InterfaceConfig> {
        self.inner.read().await.records()
    }

    /// Get the number of interfaces carrying LLDP state
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Check if the device has no LLDP interface state
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[async_trait]
impl FactProvider for MemoryDevice {
    async fn gather(&self) -> Result<Vec<InterfaceConfig>, Error> {
        Ok(self.records().await)
    }

    fn provider_name(&self) -> &'static str {
        "memory"
    }
}

#[async_trait]
impl ConfigApplier for MemoryDevice {
    async fn apply(&self, commands: &[Command], commit: bool) -> Result<ApplyOutcome, Error> {
        let diff = render_all(commands, &self.syntax).join("\n");

        if commit {
            let mut guard = self.inner.write().await;
            guard.apply_all(commands);
            debug!("Committed {} command(s), {} interface(s)", commands.len(), guard.len());
        } else {
            debug!("Check mode: staged {} command(s)", commands.len());
        }

        Ok(ApplyOutcome {
            committed: commit,
            diff: (!diff.is_empty()).then_some(diff),
        })
    }

    fn applier_name(&self) -> &'static str {
        "memory"
    }
}
