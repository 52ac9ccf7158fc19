// # File Device
//
// JSON-file-backed device implementing both FactProvider and ConfigApplier.
//
// ## Purpose
//
// Keeps the LLDP interface table of a device in a file, so that runs of the
// reconciler can be chained: the facts of one run are the committed result
// of the previous one.
//
// ## Crash Recovery
//
// - Atomic writes: Uses write-then-rename for atomicity
// - Corruption detection: Validates JSON on load
// - Automatic backup: Keeps .backup of last known good table
// - Recovery: Falls back to backup if corruption detected
//
// ## File Format
//
// ```json
// {
//   "version": "1.0",
//   "updated_at": "2025-01-09T12:00:00Z",
//   "interfaces": [
//     { "name": "eth0", "location": { "elin": "0000000911" } }
//   ]
// }
// ```

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

use crate::Error;
use crate::command::{Command, render_all};
use crate::config::CommandSyntax;
use crate::model::InterfaceConfig;
use crate::state::DeviceTable;
use crate::traits::{ApplyOutcome, ConfigApplier, FactProvider};

/// Device file format version
/// Used for future migration if format changes
const DEVICE_FILE_VERSION: &str = "1.0";

/// File-backed device with crash recovery
///
/// # Example
///
/// ```rust,no_run
/// use lldp_core::state::FileDevice;
/// use lldp_core::traits::FactProvider;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let device = FileDevice::new("/var/lib/lldp/device.json").await?;
///     let observed = device.gather().await?;
///     println!("{} interface(s)", observed.len());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FileDevice {
    path: PathBuf,
    syntax: CommandSyntax,
    table: Arc<RwLock<DeviceTable>>,
}

/// Serializable device file format
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct DeviceFileFormat {
    version: String,
    updated_at: chrono::DateTime<chrono::Utc>,
    interfaces: Vec<InterfaceConfig>,
}

impl FileDevice {
    /// Create or load a file device
    ///
    /// This will:
    /// 1. Try to load the existing device file
    /// 2. If corruption detected, try to load from backup
    /// 3. If both fail, start with an empty table
    /// 4. Create parent directories if needed
    pub async fn new<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).await.map_err(|e| {
                Error::device(format!(
                    "Failed to create device directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let table = Self::load_with_recovery(&path).await?;

        Ok(Self {
            path,
            syntax: CommandSyntax::default(),
            table: Arc::new(RwLock::new(table)),
        })
    }

    /// Use `syntax` when rendering diffs
    pub fn with_syntax(mut self, syntax: CommandSyntax) -> Self {
        self.syntax = syntax;
        self
    }

    /// Path of the device file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the table with automatic recovery
    ///
    /// Recovery strategy:
    /// 1. Try to load the main file
    /// 2. If it does not parse, try loading the backup
    /// 3. If the backup also fails, start with an empty table
    async fn load_with_recovery(path: &Path) -> Result<DeviceTable, Error> {
        match Self::load(path).await {
            Ok(table) => {
                tracing::debug!("Loaded device file: {} interface(s)", table.len());
                Ok(table)
            }
            Err(Error::Json(e)) => {
                tracing::warn!(
                    "Device file appears corrupted: {}. Attempting recovery from backup.",
                    e
                );

                let backup_path = Self::backup_path(path);
                if !backup_path.exists() {
                    tracing::warn!("No backup file found. Starting with empty table.");
                    return Ok(DeviceTable::new());
                }

                match Self::load(&backup_path).await {
                    Ok(table) => {
                        tracing::info!("Recovered device from backup: {} interface(s)", table.len());
                        if let Err(restore_err) = fs::copy(&backup_path, path).await {
                            tracing::error!(
                                "Failed to restore device file from backup: {}",
                                restore_err
                            );
                        }
                        Ok(table)
                    }
                    Err(backup_err) => {
                        tracing::error!(
                            "Backup also corrupted: {}. Starting with empty table.",
                            backup_err
                        );
                        Ok(DeviceTable::new())
                    }
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Load the table from a file
    async fn load(path: &Path) -> Result<DeviceTable, Error> {
        if !path.exists() {
            tracing::debug!("Device file does not exist: {}", path.display());
            return Ok(DeviceTable::new());
        }

        let content = fs::read_to_string(path).await.map_err(|e| {
            Error::device(format!("Failed to read device file {}: {}", path.display(), e))
        })?;

        let file: DeviceFileFormat = serde_json::from_str(&content)?;

        if file.version != DEVICE_FILE_VERSION {
            tracing::warn!(
                "Device file version mismatch: expected {}, got {}. \
                Attempting to load anyway.",
                DEVICE_FILE_VERSION,
                file.version
            );
        }

        Ok(DeviceTable::from_records(file.interfaces))
    }

    /// Write the table to the file atomically
    async fn write(&self, table: &DeviceTable) -> Result<(), Error> {
        let file = DeviceFileFormat {
            version: DEVICE_FILE_VERSION.to_string(),
            updated_at: chrono::Utc::now(),
            interfaces: table.records(),
        };
        let json = serde_json::to_string_pretty(&file)?;

        // Write to temporary file first
        let temp_path = self.temp_path();
        {
            let mut out = fs::File::create(&temp_path).await.map_err(|e| {
                Error::device(format!(
                    "Failed to create temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;
            out.write_all(json.as_bytes()).await?;
            out.flush().await?;
        }

        // Keep the previous table as backup
        if self.path.exists() {
            let backup_path = Self::backup_path(&self.path);
            if let Err(e) = fs::copy(&self.path, &backup_path).await {
                tracing::warn!("Failed to create backup: {}", e);
            }
        }

        fs::rename(&temp_path, &self.path).await.map_err(|e| {
            Error::device(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            ))
        })?;

        tracing::trace!("Device file written: {}", self.path.display());
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone();
        temp.set_extension("tmp");
        temp
    }

    fn backup_path(path: &Path) -> PathBuf {
        let mut backup = path.to_path_buf();
        backup.set_extension("backup");
        backup
    }
}

#[async_trait]
impl FactProvider for FileDevice {
    async fn gather(&self) -> Result<Vec<InterfaceConfig>, Error> {
        Ok(self.table.read().await.records())
    }

    fn provider_name(&self) -> &'static str {
        "file"
    }
}

#[async_trait]
impl ConfigApplier for FileDevice {
    async fn apply(&self, commands: &[Command], commit: bool) -> Result<ApplyOutcome, Error> {
        let diff = render_all(commands, &self.syntax).join("\n");

        if commit {
            let mut guard = self.table.write().await;
            let mut staged = guard.clone();
            staged.apply_all(commands);

            // Only publish the new table once it is on disk
            self.write(&staged).await?;
            *guard = staged;
        }

        Ok(ApplyOutcome {
            committed: commit,
            diff: (!diff.is_empty()).then_some(diff),
        })
    }

    fn applier_name(&self) -> &'static str {
        "file"
    }
}
