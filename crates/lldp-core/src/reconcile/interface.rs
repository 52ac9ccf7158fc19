//! Interface Reconciler
//!
//! Reconciles one desired record against its observed counterpart.
//!
//! ## Command order
//!
//! For an interface the device already has:
//!
//! 1. Stale location deletions (skipped for [`Policy::Merged`])
//! 2. Enable/disable change
//! 3. Additive location commands
//!
//! A new interface gets its additive location commands followed by a
//! `disable` only when the record explicitly asks for it.

use tracing::trace;

use crate::command::Command;
use crate::diff;
use crate::model::{Interface, Policy};

/// Per-interface reconciliation
#[derive(Debug, Clone, Copy)]
pub struct InterfaceReconciler {
    enable_default: bool,
}

impl InterfaceReconciler {
    /// Create a reconciler resolving absent enable flags to `enable_default`
    pub fn new(enable_default: bool) -> Self {
        Self { enable_default }
    }

    /// Commands moving `have` (if any) to `want`
    ///
    /// `hint` selects whether observed sub-state missing from `want` is
    /// removed: a merge only adds.
    pub fn reconcile(&self, hint: Policy, want: &Interface, have: Option<&Interface>) -> Vec<Command> {
        let name = want.name.as_str();
        let mut commands = Vec::new();

        match have {
            Some(have) => {
                if hint != Policy::Merged {
                    commands.extend(diff::delete_stale_location(name, want, have));
                }
                commands.extend(diff::reconcile_enable(name, want, have, self.enable_default));
                commands.extend(diff::reconcile_location(name, want, Some(have)));
            }
            None => {
                commands.extend(diff::reconcile_location(name, want, None));
                commands.extend(diff::assert_disabled(name, want));
            }
        }

        trace!("{} ({}): {} command(s)", name, hint, commands.len());
        commands
    }

    /// Commands stripping all LLDP state from a stored record
    pub fn purge(&self, have: &Interface) -> Vec<Command> {
        let name = have.name.as_str();
        let mut commands = diff::purge_location(name, have.has_location());
        commands.extend(diff::purge_disable(name, have));
        commands
    }
}
