//! Error types for taskdns
//!
//! This module defines all error types used throughout the workspace.

use thiserror::Error;

/// Result type alias for taskdns operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for taskdns
#[derive(Error, Debug)]
pub enum Error {
    /// The incoming event does not have the expected shape
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    /// An external service returned a response we cannot use
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An external service call failed
    #[error("Provider error ({provider}): {message}")]
    Provider {
        /// Service name (e.g. "ecs", "ec2", "route53")
        provider: String,
        /// Error message
        message: String,
    },
}

impl Error {
    /// Create an invalid event error
    pub fn invalid_event(msg: impl Into<String>) -> Self {
        Self::InvalidEvent(msg.into())
    }

    /// Create a "not found" error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a provider-specific error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }
}
