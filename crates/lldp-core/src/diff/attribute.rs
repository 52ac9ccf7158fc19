//! Enable/disable differ
//!
//! The device models a disabled interface with a `disable` overlay flag;
//! the absence of the flag means LLDP is enabled.

use crate::command::{Command, Directive};
use crate::model::Interface;

/// Command moving `have` to the enable state of `want`, if they differ
///
/// Absent flags on either side resolve to `enable_default`.
pub fn reconcile_enable(
    name: &str,
    want: &Interface,
    have: &Interface,
    enable_default: bool,
) -> Option<Command> {
    let want_enabled = want.enabled(enable_default);
    if want_enabled == have.enabled(enable_default) {
        return None;
    }

    if want_enabled {
        Some(Command::delete(name, Directive::Disable))
    } else {
        Some(Command::set(name, Directive::Disable))
    }
}

/// Disable command for a new interface that is explicitly disabled
pub fn assert_disabled(name: &str, want: &Interface) -> Option<Command> {
    (want.enable == Some(false)).then(|| Command::set(name, Directive::Disable))
}

/// Drop the `disable` flag from a stored record that carries it
///
/// Purging removes device state, so only an explicit `disable` counts here.
/// An absent flag has nothing to delete whatever `enable_default` says.
pub fn purge_disable(name: &str, have: &Interface) -> Option<Command> {
    (have.enable == Some(false)).then(|| Command::delete(name, Directive::Disable))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iface(enable: Option<bool>) -> Interface {
        Interface {
            name: "eth0".to_string(),
            enable,
            location: None,
        }
    }

    #[test]
    fn test_disable_enabled_interface() {
        let cmd = reconcile_enable("eth0", &iface(Some(false)), &iface(Some(true)), true);
        assert_eq!(
            cmd.unwrap().to_string(),
            "set service lldp interface eth0 disable"
        );
    }

    #[test]
    fn test_enable_disabled_interface() {
        let cmd = reconcile_enable("eth0", &iface(Some(true)), &iface(Some(false)), true);
        assert_eq!(
            cmd.unwrap().to_string(),
            "delete service lldp interface eth0 disable"
        );
    }

    #[test]
    fn test_absent_resolves_to_default() {
        assert!(reconcile_enable("eth0", &iface(None), &iface(Some(true)), true).is_none());
        assert!(reconcile_enable("eth0", &iface(None), &iface(Some(false)), false).is_none());
        assert!(reconcile_enable("eth0", &iface(None), &iface(Some(false)), true).is_some());
    }

    #[test]
    fn test_new_interface_only_asserts_explicit_disable() {
        assert!(assert_disabled("eth0", &iface(Some(false))).is_some());
        assert!(assert_disabled("eth0", &iface(None)).is_none());
        assert!(assert_disabled("eth0", &iface(Some(true))).is_none());
    }

    #[test]
    fn test_purge_disable() {
        assert_eq!(
            purge_disable("eth0", &iface(Some(false))).unwrap().to_string(),
            "delete service lldp interface eth0 disable"
        );
        assert!(purge_disable("eth0", &iface(None)).is_none());
        assert!(purge_disable("eth0", &iface(Some(true))).is_none());
    }

    #[test]
    fn test_purge_ignores_enable_default() {
        // Absent flag reads as disabled under this default, yet the device stores nothing
        let have = iface(None);
        assert!(!have.enabled(false));
        assert!(purge_disable("eth0", &have).is_none());
    }
}
