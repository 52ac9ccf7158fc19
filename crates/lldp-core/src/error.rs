//! Error types for the LLDP reconciliation system
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for LLDP operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the LLDP reconciliation system
#[derive(Error, Debug)]
pub enum Error {
    /// Desired-state record rejected before reconciliation
    #[error("Invalid configuration for interface {interface}: {message}")]
    Validation {
        /// Interface the record belongs to
        interface: String,
        /// What is wrong with it
        message: String,
    },

    /// A value could not be coerced to the shape its attribute requires
    #[error("Invalid value for interface {interface}: {message}")]
    InvalidValue {
        /// Interface the value belongs to
        interface: String,
        /// What is wrong with it
        message: String,
    },

    /// Observed state violates a collection invariant
    #[error("Invalid facts: {0}")]
    InvalidFacts(String),

    /// Fact provider errors
    #[error("Fact provider error: {0}")]
    FactProvider(String),

    /// Applier errors
    #[error("Applier error: {0}")]
    Applier(String),

    /// Device backend errors (reading or persisting the interface table)
    #[error("Device error: {0}")]
    Device(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a validation error for a desired-state record
    pub fn validation(interface: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            interface: interface.into(),
            message: message.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(interface: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            interface: interface.into(),
            message: message.into(),
        }
    }

    /// Create an invalid facts error
    pub fn invalid_facts(msg: impl Into<String>) -> Self {
        Self::InvalidFacts(msg.into())
    }

    /// Create a fact provider error
    pub fn fact_provider(msg: impl Into<String>) -> Self {
        Self::FactProvider(msg.into())
    }

    /// Create an applier error
    pub fn applier(msg: impl Into<String>) -> Self {
        Self::Applier(msg.into())
    }

    /// Create a device error
    pub fn device(msg: impl Into<String>) -> Self {
        Self::Device(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Name of the interface the error is attached to, if any
    pub fn interface(&self) -> Option<&str> {
        match self {
            Self::Validation { interface, .. } | Self::InvalidValue { interface, .. } => {
                Some(interface)
            }
            _ => None,
        }
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
