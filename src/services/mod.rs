//! Service layer for the job search client.
//!
//! This module contains the business logic for:
//! - Occupation classification (`classifier`)
//! - Client- and server-side filtering (`filter`)
//! - County and branch lookups, plus the taxonomy API (`taxonomy`)
//! - The search API client (`JobSearchClient`)
//! - Multi-region page fetching (`JobFetcher`)
//! - Request generations and pagination (`SearchSession`)
//! - Region statistics (`chart`)

pub mod chart;
pub mod classifier;
pub mod filter;
pub mod taxonomy;

mod fetcher;
mod search;
mod session;

pub use fetcher::{JobFetcher, effective_regions};
pub use filter::{SearchParams, describe_filters, filter_jobs};
pub use search::{JobSearchApi, JobSearchClient, recent_jobs};
pub use session::{FetchTicket, SearchSession};
pub use taxonomy::TaxonomyClient;
