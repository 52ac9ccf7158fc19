//! Collaborator traits
//!
//! This module defines the interfaces of the components around the engine.
//!
//! - [`FactProvider`]: Read the observed LLDP interface configuration
//! - [`ConfigApplier`]: Apply an ordered command list to the device

pub mod applier;
pub mod fact_provider;

pub use applier::{ApplyOutcome, ConfigApplier};
pub use fact_provider::FactProvider;
