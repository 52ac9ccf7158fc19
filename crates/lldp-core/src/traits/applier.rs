// # Config Applier Trait
//
// Defines the sink that takes an ordered command list and applies it to the
// device, either committing it or staging it as a dry run.
//
// ## Ordering
//
// Commands must be applied in the order given. Deletions of stale sub-state
// come before the additions that depend on them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::command::Command;

/// Result of applying a command list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyOutcome {
    /// Whether the commands were committed to the running configuration
    pub committed: bool,
    /// Device-side description of the change, when the device offers one
    pub diff: Option<String>,
}

/// Trait for applier implementations
///
/// # Contract
///
/// - `commit = false` must leave the device unchanged (check mode).
/// - A failure must be reported as an error; the applier owns any
///   retry or rollback policy.
#[async_trait]
pub trait ConfigApplier: Send + Sync {
    /// Apply `commands` in order
    ///
    /// # Parameters
    ///
    /// - `commands`: The ordered command list
    /// - `commit`: Commit the change (`true`) or only stage it (`false`)
    async fn apply(&self, commands: &[Command], commit: bool)
    -> Result<ApplyOutcome, crate::Error>;

    /// Get the applier name (for logging/debugging)
    fn applier_name(&self) -> &'static str;
}
