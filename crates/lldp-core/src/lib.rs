// # lldp-core
//
// Core library for reconciling per-interface LLDP configuration.
//
// ## Architecture Overview
//
// This library turns a desired set of LLDP interface records and the set
// observed on a device into the ordered list of configuration commands that
// drives the device to the desired state:
// - **model**: Interface records as supplied, and their normalized form
// - **diff**: Location and enable/disable differs for one interface
// - **reconcile**: Per-interface reconciler and the policy dispatcher
// - **ReconcileEngine**: Validates input and returns the command list
// - **LldpInterfaces**: Gathers facts, reconciles and applies in one run
// - **FactProvider / ConfigApplier**: Traits at the device boundary
//
// ## Design Principles
//
// 1. **Pure Core**: Command generation performs no I/O
// 2. **All or Nothing**: Any validation failure yields no commands at all
// 3. **Deterministic**: Output order follows the order of the inputs
// 4. **Library-First**: Devices are pluggable through the traits

pub mod command;
pub mod config;
pub mod diff;
pub mod engine;
pub mod error;
pub mod model;
pub mod reconcile;
pub mod state;
pub mod traits;

// Re-export core types for convenience
pub use command::{Action, Command, Directive};
pub use config::{CommandSyntax, DeviceConfig, EngineConfig, ModuleConfig};
pub use engine::{ExecutionResult, LldpInterfaces, ReconcileEngine};
pub use error::{Error, Result};
pub use model::{InterfaceConfig, LocationConfig, Policy};
pub use state::{FileDevice, MemoryDevice};
pub use traits::{ApplyOutcome, ConfigApplier, FactProvider};
