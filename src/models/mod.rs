// src/models/mod.rs

//! Domain models for the job search client.

mod branch;
mod config;
mod filter;
mod job;

pub use branch::Branch;
pub use config::{
    ApiConfig, Config, LoggingConfig, SEARCH_API_URL_ENV, SearchConfig, SearchMode, StorageConfig,
    TAXONOMY_API_URL_ENV,
};
pub use filter::{FilterCriteria, JobPage, normalize_term};
pub use job::{
    ApplicationDetails, Concept, Employer, FreetextConcept, JobAd, JobDescription, Occupation,
    ScopeOfWork, WorkplaceAddress, parse_timestamp,
};
