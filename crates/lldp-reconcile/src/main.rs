// # lldp-reconcile - LLDP Interface Reconciler
//
// This binary is a THIN integration layer over lldp-core. It performs no
// reconciliation logic of its own.
//
// The lldp-reconcile binary is responsible for:
// 1. Reading configuration from environment variables
// 2. Loading the desired interface records
// 3. Opening the device
// 4. Running one reconciliation and printing the result as JSON
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// - `LLDP_DESIRED_PATH`: JSON file holding the desired interface records
//   (optional for `deleted`, where an absent file means "all interfaces")
// - `LLDP_STATE`: Policy (merged, replaced, overridden, deleted)
// - `LLDP_DEVICE_PATH`: Device file; an in-memory device is used when unset
// - `LLDP_CHECK_MODE`: Stage commands without committing (true/false)
// - `LLDP_LOG_LEVEL`: trace, debug, info, warn, error
//
// ## Example
//
// ```bash
// export LLDP_DESIRED_PATH=/etc/lldp/interfaces.json
// export LLDP_DEVICE_PATH=/var/lib/lldp/device.json
// export LLDP_STATE=replaced
//
// lldp-reconcile
// ```

use anyhow::{Context, Result};
use lldp_core::model::{InterfaceConfig, Policy};
use lldp_core::state::open_device;
use lldp_core::{DeviceConfig, LldpInterfaces, ModuleConfig};
use std::env;
use std::path::Path;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: Run completed
/// - 1: Configuration or input error
/// - 2: Runtime error (device or applier failure)
#[derive(Debug, Clone, Copy)]
enum LldpExitCode {
    /// Run completed (changed or not)
    Success = 0,
    /// Configuration error or rejected desired records
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<LldpExitCode> for ExitCode {
    fn from(code: LldpExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
struct Config {
    desired_path: Option<String>,
    device_path: Option<String>,
    state: String,
    check_mode: String,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Self {
        Self {
            desired_path: env::var("LLDP_DESIRED_PATH").ok(),
            device_path: env::var("LLDP_DEVICE_PATH").ok(),
            state: env::var("LLDP_STATE").unwrap_or_else(|_| "merged".to_string()),
            check_mode: env::var("LLDP_CHECK_MODE").unwrap_or_else(|_| "false".to_string()),
            log_level: env::var("LLDP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        let policy = self.policy()?;
        self.check_mode()?;

        match &self.desired_path {
            Some(path) if path.is_empty() => {
                anyhow::bail!("LLDP_DESIRED_PATH cannot be empty when set")
            }
            Some(path) if !Path::new(path).is_file() => {
                anyhow::bail!("LLDP_DESIRED_PATH does not point to a file: {}", path)
            }
            None if policy != Policy::Deleted => anyhow::bail!(
                "LLDP_DESIRED_PATH is required when LLDP_STATE={}. \
                Set it via: export LLDP_DESIRED_PATH=/etc/lldp/interfaces.json",
                policy
            ),
            _ => {}
        }

        if let Some(path) = &self.device_path {
            if path.is_empty() {
                anyhow::bail!("LLDP_DEVICE_PATH cannot be empty when set");
            }

            if let Some(parent) = Path::new(path).parent()
                && !parent.as_os_str().is_empty()
                && !parent.exists()
            {
                anyhow::bail!(
                    "LLDP_DEVICE_PATH parent directory does not exist: {}. \
                    Create it first: mkdir -p {}",
                    parent.display(),
                    parent.display()
                );
            }
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!(
                "LLDP_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        Ok(())
    }

    fn policy(&self) -> Result<Policy> {
        self.state
            .parse()
            .with_context(|| format!("LLDP_STATE '{}' is not valid", self.state))
    }

    fn check_mode(&self) -> Result<bool> {
        match self.check_mode.to_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" | "" => Ok(false),
            other => anyhow::bail!("LLDP_CHECK_MODE '{}' is not a boolean", other),
        }
    }

    fn device(&self) -> DeviceConfig {
        match &self.device_path {
            Some(path) => DeviceConfig::File { path: path.clone() },
            None => DeviceConfig::Memory,
        }
    }
}

fn main() -> ExitCode {
    let config = Config::from_env();

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {:#}", e);
        return LldpExitCode::ConfigError.into();
    }

    let log_level = match config.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr, stdout carries the result document
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return LldpExitCode::ConfigError.into();
    }

    let module = match load_module_config(&config) {
        Ok(module) => module,
        Err(e) => {
            error!("Failed to load desired configuration: {:#}", e);
            return LldpExitCode::ConfigError.into();
        }
    };

    info!(
        "Reconciling {} interface(s) with state {}",
        module.config.len(),
        module.state
    );

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return LldpExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        match run(&module).await {
            Ok(()) => LldpExitCode::Success,
            Err(e) => {
                error!("Reconciliation failed: {:#}", e);
                exit_code_for(&e)
            }
        }
    })
    .into()
}

/// Build the module configuration from the environment settings
fn load_module_config(config: &Config) -> Result<ModuleConfig> {
    let desired: Vec<InterfaceConfig> = match &config.desired_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path))?
        }
        None => Vec::new(),
    };

    let mut module =
        ModuleConfig::new(config.policy()?, desired).with_check_mode(config.check_mode()?);
    module.device = config.device();
    module.validate()?;
    Ok(module)
}

/// Run one reconciliation and print the result
async fn run(module: &ModuleConfig) -> Result<()> {
    let (facts, applier) = open_device(&module.device, &module.engine.syntax).await?;
    let runner = LldpInterfaces::new(facts, applier);

    let result = runner.execute(module).await?;
    if result.changed {
        info!("Applied {} command(s)", result.commands.len());
    } else {
        info!("Device already matches the desired state");
    }

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Rejected input is a configuration error; everything else is a runtime error
fn exit_code_for(err: &anyhow::Error) -> LldpExitCode {
    match err.downcast_ref::<lldp_core::Error>() {
        Some(lldp_core::Error::Validation { .. })
        | Some(lldp_core::Error::InvalidValue { .. })
        | Some(lldp_core::Error::Config(_)) => LldpExitCode::ConfigError,
        _ => LldpExitCode::RuntimeError,
    }
}
