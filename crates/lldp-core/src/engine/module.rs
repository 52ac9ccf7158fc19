//! Module execution
//!
//! Runs one full cycle against a device:
//!
//! 1. Gather the observed records (`before`)
//! 2. Compute the command list
//! 3. Apply it when non-empty, committing unless in check mode
//! 4. Gather again (`after`, reported only when something changed)

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::config::ModuleConfig;
use crate::engine::ReconcileEngine;
use crate::error::{Error, Result};
use crate::model::InterfaceConfig;
use crate::traits::{ConfigApplier, FactProvider};

/// Outcome of a module run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Whether any command was sent to the device
    pub changed: bool,
    /// Rendered commands, in application order
    pub commands: Vec<String>,
    /// Observed records before the run
    pub before: Vec<InterfaceConfig>,
    /// Observed records after the run, when changed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<Vec<InterfaceConfig>>,
    /// Device diff, when changed and reported by the applier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// Gathers facts, reconciles and applies for the LLDP interfaces resource
pub struct LldpInterfaces {
    /// Fact provider for the observed state
    facts: Box<dyn FactProvider>,

    /// Applier receiving the command list
    applier: Box<dyn ConfigApplier>,
}

impl LldpInterfaces {
    /// Create a runner over a fact provider and an applier
    pub fn new(facts: Box<dyn FactProvider>, applier: Box<dyn ConfigApplier>) -> Self {
        Self { facts, applier }
    }

    /// Run one reconciliation cycle
    ///
    /// Validation and reconciliation errors abort before the applier is
    /// called, so the device never sees a partial command list.
    pub async fn execute(&self, config: &ModuleConfig) -> Result<ExecutionResult> {
        config.validate()?;
        let engine = ReconcileEngine::new(config.engine.clone());

        let before = self.gather().await?;
        debug!(
            "Gathered {} interface(s) from {}",
            before.len(),
            self.facts.provider_name()
        );

        let commands = engine.reconcile(config.state, &config.config, &before)?;
        let mut result = ExecutionResult {
            commands: engine.render(&commands),
            before,
            ..ExecutionResult::default()
        };

        if commands.is_empty() {
            info!("No changes for state {}", config.state);
            return Ok(result);
        }

        let commit = !config.check_mode;
        let outcome = self
            .applier
            .apply(&commands, commit)
            .await
            .map_err(|e| {
                error!("Applier {} failed: {}", self.applier.applier_name(), e);
                Error::applier(format!("{}: {}", self.applier.applier_name(), e))
            })?;

        info!(
            "Applied {} command(s) via {} (commit: {})",
            commands.len(),
            self.applier.applier_name(),
            outcome.committed
        );
        if !outcome.committed {
            result
                .warnings
                .push("check mode: commands were not committed".to_string());
        }

        result.changed = true;
        result.diff = outcome.diff;
        result.after = Some(self.gather().await?);
        Ok(result)
    }

    async fn gather(&self) -> Result<Vec<InterfaceConfig>> {
        self.facts
            .gather()
            .await
            .map_err(|e| Error::fact_provider(format!("{}: {}", self.facts.provider_name(), e)))
    }
}
