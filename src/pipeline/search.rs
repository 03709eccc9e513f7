// src/pipeline/search.rs

//! Search pipeline: filters in, one page of jobs out.

use crate::error::Result;
use crate::models::{FilterCriteria, JobAd, JobPage};
use crate::services::{JobFetcher, JobSearchApi, SearchSession, describe_filters};

/// Result of one search run.
#[derive(Debug, Clone)]
pub struct SearchReport {
    /// Summary of the active filters
    pub filters: String,
    /// 1-based page number
    pub page: usize,
    pub page_count: usize,
    pub results: JobPage,
}

/// Fetch one page of jobs for the given filters.
///
/// Fetch failures are logged and reported as an empty page.
pub async fn run_search<A: JobSearchApi>(
    fetcher: &JobFetcher<A>,
    criteria: FilterCriteria,
    page: usize,
    page_size: usize,
) -> SearchReport {
    let filters = describe_filters(&criteria);
    log::info!("{}", filters);
    log::debug!("Filtering in {:?} mode", fetcher.mode());

    let mut session = SearchSession::new(page_size);
    session.set_criteria(criteria);
    session.set_page(page);

    if !session.refresh(fetcher).await {
        log::warn!("Search results were superseded");
    }

    log::info!(
        "Page {} of {} ({} jobs in total)",
        session.page(),
        session.page_count(),
        session.results().total
    );

    SearchReport {
        filters,
        page: session.page(),
        page_count: session.page_count(),
        results: session.results().clone(),
    }
}

/// Fetch a single job by id.
pub async fn run_show<A: JobSearchApi>(fetcher: &JobFetcher<A>, id: &str) -> Result<JobAd> {
    match fetcher.fetch_job(id).await {
        Ok(job) => Ok(job),
        Err(e) if e.is_not_found() => {
            log::warn!("No job with id {}", id);
            Err(e)
        }
        Err(e) => {
            log::error!("Failed to fetch job {}: {}", id, e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::error::AppError;
    use crate::models::SearchMode;
    use crate::services::SearchParams;

    struct PagedApi;

    #[async_trait]
    impl JobSearchApi for PagedApi {
        async fn search(&self, params: &SearchParams) -> Result<JobPage> {
            let jobs = (0..params.limit)
                .map(|i| JobAd {
                    id: (params.offset + i).to_string(),
                    ..JobAd::default()
                })
                .collect();
            Ok(JobPage::new(jobs, 95))
        }

        async fn job_by_id(&self, id: &str) -> Result<JobAd> {
            Err(AppError::NotFound(id.to_string()))
        }
    }

    #[tokio::test]
    async fn test_run_search_pages() {
        let fetcher = JobFetcher::new(PagedApi, SearchMode::Server);
        let report = run_search(&fetcher, FilterCriteria::default(), 2, 10).await;

        assert_eq!(report.filters, "Inga filter applicerade");
        assert_eq!(report.page, 2);
        assert_eq!(report.page_count, 10);
        assert_eq!(report.results.jobs[0].id, "10");
    }

    #[tokio::test]
    async fn test_run_show_not_found() {
        let fetcher = JobFetcher::new(PagedApi, SearchMode::Server);
        assert!(run_show(&fetcher, "x").await.unwrap_err().is_not_found());
    }
}
