// src/pipeline/stats.rs

//! Region statistics pipeline.

use chrono::Utc;

use crate::models::SearchConfig;
use crate::services::JobSearchApi;
use crate::services::chart::{RegionCount, region_statistics};

/// Count today's jobs per region using the configured sample size and window.
pub async fn run_chart<A: JobSearchApi + ?Sized>(api: &A, config: &SearchConfig) -> Vec<RegionCount> {
    log::info!(
        "Counting jobs from the last {}h among the latest {} ads",
        config.chart_window_hours,
        config.chart_limit
    );

    let counts = region_statistics(api, config.chart_limit, config.chart_window_hours, Utc::now()).await;
    let total: usize = counts.iter().map(|c| c.count).sum();
    log::info!("{} jobs across {} regions", total, counts.len());
    counts
}
