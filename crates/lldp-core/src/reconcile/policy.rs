//! Policy Dispatcher
//!
//! Runs one reconciliation recipe over the full desired and observed
//! collections, matching records by interface name.
//!
//! | Policy       | Interfaces in want                 | Interfaces only in have |
//! |--------------|------------------------------------|-------------------------|
//! | `merged`     | reconciled, additive only          | untouched               |
//! | `replaced`   | stale state removed, then merged   | untouched               |
//! | `overridden` | as `replaced`                      | purged (first)          |
//! | `deleted`    | matching have purged               | purged if want is empty |

use tracing::debug;

use crate::command::Command;
use crate::model::{Interface, Policy};
use crate::reconcile::InterfaceReconciler;

/// Dispatches a policy over interface collections
#[derive(Debug, Clone, Copy)]
pub struct PolicyDispatcher {
    reconciler: InterfaceReconciler,
}

impl PolicyDispatcher {
    pub fn new(reconciler: InterfaceReconciler) -> Self {
        Self { reconciler }
    }

    /// Commands for `policy`, in application order
    pub fn dispatch(&self, policy: Policy, want: &[Interface], have: &[Interface]) -> Vec<Command> {
        let commands = match policy {
            Policy::Merged => self.merged(want, have),
            Policy::Replaced => self.replaced(want, have),
            Policy::Overridden => self.overridden(want, have),
            Policy::Deleted => self.deleted(want, have),
        };
        debug!(
            "{}: {} desired, {} observed -> {} command(s)",
            policy,
            want.len(),
            have.len(),
            commands.len()
        );
        commands
    }

    fn merged(&self, want: &[Interface], have: &[Interface]) -> Vec<Command> {
        want.iter()
            .flat_map(|w| self.reconciler.reconcile(Policy::Merged, w, find(have, &w.name)))
            .collect()
    }

    fn replaced(&self, want: &[Interface], have: &[Interface]) -> Vec<Command> {
        want.iter()
            .flat_map(|w| self.reconciler.reconcile(Policy::Replaced, w, find(have, &w.name)))
            .collect()
    }

    fn overridden(&self, want: &[Interface], have: &[Interface]) -> Vec<Command> {
        let mut commands: Vec<Command> = have
            .iter()
            .filter(|h| find(want, &h.name).is_none())
            .flat_map(|h| self.reconciler.purge(h))
            .collect();
        commands.extend(self.replaced(want, have));
        commands
    }

    fn deleted(&self, want: &[Interface], have: &[Interface]) -> Vec<Command> {
        if want.is_empty() {
            return have.iter().flat_map(|h| self.reconciler.purge(h)).collect();
        }
        want.iter()
            .filter_map(|w| find(have, &w.name))
            .flat_map(|h| self.reconciler.purge(h))
            .collect()
    }
}

fn find<'a>(interfaces: &'a [Interface], name: &str) -> Option<&'a Interface> {
    interfaces.iter().find(|i| i.name == name)
}
