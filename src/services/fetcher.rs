// src/services/fetcher.rs

//! Fetching result pages from the search API.
//!
//! In server mode the filters become query parameters. The search endpoint
//! accepts a single region, so a selection of several counties fans out into
//! one concurrent call per region:
//!
//! ```text
//! per_region = ceil(page_size / regions)
//! jobs       = concat(region results, request order) -> dedupe by id -> truncate(page_size)
//! total      = sum(region totals)
//! ```
//!
//! The summed total counts ads listed in more than one region once per region.

use std::collections::HashSet;

use futures::future::join_all;

use crate::error::{AppError, Result};
use crate::models::{FilterCriteria, JobAd, JobPage, SearchMode};
use crate::services::filter::{SearchParams, filter_by_criteria};
use crate::services::search::JobSearchApi;
use crate::services::taxonomy::{county_for_region_code, region_codes_for_counties};

/// Fetches pages of jobs through a [`JobSearchApi`].
pub struct JobFetcher<A> {
    api: A,
    mode: SearchMode,
}

impl<A: JobSearchApi> JobFetcher<A> {
    pub fn new(api: A, mode: SearchMode) -> Self {
        Self { api, mode }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Fetch one page. Any failure, including a single failed region, fails
    /// the whole call.
    pub async fn try_fetch_page(
        &self,
        page_size: usize,
        offset: usize,
        criteria: &FilterCriteria,
    ) -> Result<JobPage> {
        match self.mode {
            SearchMode::Server => self.fetch_server_side(page_size, offset, criteria).await,
            SearchMode::Client => self.fetch_client_side(page_size, offset, criteria).await,
        }
    }

    /// Fetch one page, logging failures and returning an empty page instead.
    pub async fn fetch_page(
        &self,
        page_size: usize,
        offset: usize,
        criteria: &FilterCriteria,
    ) -> JobPage {
        match self.try_fetch_page(page_size, offset, criteria).await {
            Ok(page) => page,
            Err(e) => {
                log::warn!("Failed to fetch jobs: {}", e);
                JobPage::empty()
            }
        }
    }

    /// Fetch a single ad.
    pub async fn fetch_job(&self, id: &str) -> Result<JobAd> {
        self.api.job_by_id(id).await
    }

    async fn fetch_server_side(
        &self,
        page_size: usize,
        offset: usize,
        criteria: &FilterCriteria,
    ) -> Result<JobPage> {
        let params = SearchParams::build(page_size, offset, criteria);
        let regions = effective_regions(criteria);

        if regions.len() < 2 {
            return self.api.search(&params).await;
        }

        let per_region = page_size.div_ceil(regions.len());
        log::debug!(
            "Fetching {} regions with {} jobs each",
            regions.len(),
            per_region
        );

        let calls = regions.iter().map(|region| {
            let regional = params.for_region(region, per_region);
            log::debug!(
                "Requesting region {} ({})",
                region,
                county_for_region_code(region).unwrap_or("?")
            );
            async move { (*region, self.api.search(&regional).await) }
        });
        let results = join_all(calls).await;

        let mut pages = Vec::with_capacity(results.len());
        for (region, result) in results {
            let page = result.map_err(|e| AppError::region_fetch(region, e))?;
            pages.push(page);
        }

        Ok(merge_region_pages(pages, page_size))
    }

    async fn fetch_client_side(
        &self,
        page_size: usize,
        offset: usize,
        criteria: &FilterCriteria,
    ) -> Result<JobPage> {
        let batch = self.api.search(&SearchParams::page(page_size, offset)).await?;
        let jobs = filter_by_criteria(&batch.jobs, criteria);
        let total = jobs.len();
        Ok(JobPage::new(jobs, total))
    }
}

/// Region codes a server-side fetch fans out over.
///
/// Unknown counties are dropped and do not count towards the per-region
/// split. Empty when a search term is present, so a term never fans out.
pub fn effective_regions(criteria: &FilterCriteria) -> Vec<&'static str> {
    if criteria.has_search_term() {
        return Vec::new();
    }
    region_codes_for_counties(&criteria.locations)
}

/// Merge per-region pages in request order.
fn merge_region_pages(pages: Vec<JobPage>, page_size: usize) -> JobPage {
    let total = pages.iter().map(|page| page.total).sum();
    let mut seen = HashSet::new();

    let jobs: Vec<JobAd> = pages
        .into_iter()
        .flat_map(|page| page.jobs)
        .filter(|job| seen.insert(job.id.clone()))
        .take(page_size)
        .collect();

    JobPage::new(jobs, total)
}
