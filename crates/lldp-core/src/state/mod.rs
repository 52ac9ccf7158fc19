// # Device Implementations
//
// This module provides devices implementing both the FactProvider and the
// ConfigApplier traits, backed by different storage.

pub mod file;
pub mod memory;
pub mod table;

pub use file::FileDevice;
pub use memory::MemoryDevice;
pub use table::DeviceTable;

use crate::config::{CommandSyntax, DeviceConfig};
use crate::error::Result;
use crate::traits::{ConfigApplier, FactProvider};

/// Open the device described by `config`
///
/// Returns the fact provider and the applier; both share one table.
pub async fn open_device(
    config: &DeviceConfig,
    syntax: &CommandSyntax,
) -> Result<(Box<dyn FactProvider>, Box<dyn ConfigApplier>)> {
    config.validate()?;

    match config {
        DeviceConfig::Memory => {
            let device = MemoryDevice::new().with_syntax(syntax.clone());
            Ok((Box::new(device.clone()), Box::new(device)))
        }
        DeviceConfig::File { path } => {
            let device = FileDevice::new(path).await?.with_syntax(syntax.clone());
            Ok((Box::new(device.clone()), Box::new(device)))
        }
    }
}
