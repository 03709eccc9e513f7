//! Storage abstractions for the saved jobs collection.
//!
//! The whole collection lives under a single key and is rewritten in full on
//! every change.
//!
//! ## Directory Structure
//!
//! ```text
//! storage/
//! ├── config.toml           # Application configuration
//! └── saved_jobs.json       # Saved jobs, in save order
//! ```

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::JobAd;

// Re-export for convenience
pub use local::LocalStorage;

/// Trait for saved jobs storage backends.
#[async_trait]
pub trait SavedJobsStorage: Send + Sync {
    /// Load the saved collection. A missing key yields an empty collection.
    async fn load(&self) -> Result<Vec<JobAd>>;

    /// Replace the saved collection.
    async fn save(&self, jobs: &[JobAd]) -> Result<()>;
}
