//! Pipeline entry points for CLI operations.
//!
//! - `run_search` / `run_show`: Fetch a page of jobs or a single ad
//! - `run_save` / `run_remove` / `run_toggle`: Manage saved jobs
//! - `run_chart`: Count today's jobs per region

pub mod report;
pub mod saved;
pub mod search;
pub mod stats;

pub use saved::{run_remove, run_save, run_toggle};
pub use search::{SearchReport, run_search, run_show};
pub use stats::run_chart;
