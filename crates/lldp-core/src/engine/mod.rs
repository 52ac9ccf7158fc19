//! Reconciliation engine
//!
//! The ReconcileEngine is responsible for:
//! - Validating the desired records and normalizing the observed ones
//! - Dispatching the selected policy
//! - Returning the complete, ordered command list (or nothing at all)
//!
//! ## Architecture
//!
//! ```text
//!   DesiredSet ──┐                      ┌──────────────────────┐
//!                ├──► ReconcileEngine ──► PolicyDispatcher     │
//!  ObservedSet ──┘    (validate)        │  InterfaceReconciler │
//!                                       │   location/attribute │
//!                                       └──────────┬───────────┘
//!                                                  ▼
//!                                           Vec<Command>
//! ```
//!
//! The engine is a pure function of its inputs: no I/O, no state between
//! calls. Any validation or coercion failure aborts the whole run before a
//! single command is returned.

pub mod module;

pub use module::{ExecutionResult, LldpInterfaces};

use std::collections::HashSet;
use tracing::{debug, info};

use crate::command::{Command, render_all};
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::model::{Interface, InterfaceConfig, Policy};
use crate::reconcile::{InterfaceReconciler, PolicyDispatcher};

/// Stateless reconciliation engine
#[derive(Debug, Clone, Default)]
pub struct ReconcileEngine {
    config: EngineConfig,
}

impl ReconcileEngine {
    /// Create a new engine
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Compute the commands driving `observed` to `desired` under `policy`
    ///
    /// # Errors
    ///
    /// - [`Error::Validation`]: a desired record is malformed or listed twice
    /// - [`Error::InvalidValue`]: a value in either collection cannot be coerced
    /// - [`Error::InvalidFacts`]: an observed interface is listed twice
    pub fn reconcile(
        &self,
        policy: Policy,
        desired: &[InterfaceConfig],
        observed: &[InterfaceConfig],
    ) -> Result<Vec<Command>> {
        let want = normalize_desired(desired)?;
        let have = normalize_observed(observed)?;

        let dispatcher =
            PolicyDispatcher::new(InterfaceReconciler::new(self.config.enable_default));
        let commands = dispatcher.dispatch(policy, &want, &have);

        if commands.is_empty() {
            debug!("Policy {}: device already matches", policy);
        } else {
            info!("Policy {}: {} command(s)", policy, commands.len());
        }
        Ok(commands)
    }

    /// Same as [`reconcile`](Self::reconcile), rendered in the device syntax
    pub fn reconcile_rendered(
        &self,
        policy: Policy,
        desired: &[InterfaceConfig],
        observed: &[InterfaceConfig],
    ) -> Result<Vec<String>> {
        let commands = self.reconcile(policy, desired, observed)?;
        Ok(self.render(&commands))
    }

    /// Render commands in the configured device syntax
    pub fn render(&self, commands: &[Command]) -> Vec<String> {
        render_all(commands, &self.config.syntax)
    }
}

fn normalize_desired(desired: &[InterfaceConfig]) -> Result<Vec<Interface>> {
    let mut seen = HashSet::new();
    desired
        .iter()
        .map(|config| {
            if !seen.insert(config.name.as_str()) {
                return Err(Error::validation(
                    config.name.clone(),
                    "interface is listed more than once",
                ));
            }
            Interface::from_desired(config)
        })
        .collect()
}

fn normalize_observed(observed: &[InterfaceConfig]) -> Result<Vec<Interface>> {
    let mut seen = HashSet::new();
    observed
        .iter()
        .map(|config| {
            if !seen.insert(config.name.as_str()) {
                return Err(Error::invalid_facts(format!(
                    "interface {} is reported more than once",
                    config.name
                )));
            }
            if let Some(location) = &config.location
                && location.populated().len() > 1
            {
                debug!(
                    "{} reports several location representations, using {}",
                    config.name,
                    location.populated()[0]
                );
            }
            Interface::from_observed(config)
        })
        .collect()
}
