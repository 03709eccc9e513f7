// src/error.rs

//! Unified error handling for the job search client.

use std::fmt;

use thiserror::Error;

/// Result type alias for apploy operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration value validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// The API answered with data we cannot use
    #[error("Invalid job data: {0}")]
    InvalidData(String),

    /// The requested ad does not exist (HTTP 404)
    #[error("Job not found: {0}")]
    NotFound(String),

    /// The API answered with a non-success status
    #[error("API error {status} for {context}")]
    Api { status: u16, context: String },

    /// One region of a multi-region fetch failed
    #[error("Fetch failed for region {region}: {message}")]
    RegionFetch { region: String, message: String },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an invalid data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData(message.into())
    }

    /// Create an API status error with context.
    pub fn api(status: u16, context: impl Into<String>) -> Self {
        Self::Api {
            status,
            context: context.into(),
        }
    }

    /// Create a region fetch error.
    pub fn region_fetch(region: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::RegionFetch {
            region: region.into(),
            message: message.to_string(),
        }
    }

    /// Whether this error means the requested resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
