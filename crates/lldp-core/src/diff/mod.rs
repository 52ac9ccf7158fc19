//! Structural differs
//!
//! - [`location`]: the polymorphic location subtree
//! - [`attribute`]: the enable/disable flag
//!
//! Every differ returns its own commands; callers concatenate them.

pub mod attribute;
pub mod location;

pub use attribute::{assert_disabled, purge_disable, reconcile_enable};
pub use location::{delete_stale_location, purge_location, reconcile_location};
