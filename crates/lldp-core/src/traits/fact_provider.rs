// # Fact Provider Trait
//
// Defines the interface for reading the device's current LLDP interface
// configuration, already parsed into `InterfaceConfig` records.
//
// ## Implementations
//
// - In-memory device: `state::MemoryDevice`
// - JSON file device: `state::FileDevice`
//
// ## Usage
//
// ```rust,ignore
// use lldp_core::FactProvider;
//
// let facts = /* FactProvider implementation */;
// let observed = facts.gather().await?;
// ```

use async_trait::async_trait;

use crate::model::InterfaceConfig;

/// Trait for fact provider implementations
///
/// # Contract
///
/// - Returns one record per interface that carries LLDP configuration.
/// - Returns an empty list, not an error, when no LLDP interface state exists.
/// - Never decides what should change; that is owned by the engine.
///
/// Implementations must be thread-safe and usable across async tasks.
#[async_trait]
pub trait FactProvider: Send + Sync {
    /// Gather the current LLDP interface configuration
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<InterfaceConfig>)`: The observed records, possibly empty
    /// - `Err(Error)`: If the device could not be read
    async fn gather(&self) -> Result<Vec<InterfaceConfig>, crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
