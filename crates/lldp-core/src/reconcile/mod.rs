//! Reconciliation recipes
//!
//! - [`InterfaceReconciler`]: one interface, merge/replace/purge
//! - [`PolicyDispatcher`]: the four policies over whole collections

pub mod interface;
pub mod policy;

pub use interface::InterfaceReconciler;
pub use policy::PolicyDispatcher;
