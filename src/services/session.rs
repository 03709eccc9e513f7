// src/services/session.rs

//! Search session state: filters, pagination and the latest results.
//!
//! Every fetch is tagged with a generation number. A response is applied only
//! if its ticket is the most recently issued one, so a slow response for old
//! filters can never overwrite results for newer ones.

use crate::models::{FilterCriteria, JobPage};
use crate::services::fetcher::JobFetcher;
use crate::services::search::JobSearchApi;

/// Identifies one fetch issued by a [`SearchSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    pub page_size: usize,
    pub offset: usize,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone)]
pub struct SearchSession {
    criteria: FilterCriteria,
    page_size: usize,
    /// 1-based
    page: usize,
    generation: u64,
    loading: bool,
    results: JobPage,
}

impl SearchSession {
    pub fn new(page_size: usize) -> Self {
        Self {
            criteria: FilterCriteria::default(),
            page_size,
            page: 1,
            generation: 0,
            loading: false,
            results: JobPage::empty(),
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Replace the filters and go back to the first page.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.page = 1;
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Go to a 1-based page. Page 0 is treated as page 1, and pages whose
    /// offset would not fit in a `usize` are capped at the last one that does.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.max_page());
    }

    /// Offset of the first job on the current page.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }

    fn max_page(&self) -> usize {
        (usize::MAX / self.page_size.max(1)).saturating_add(1)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn results(&self) -> &JobPage {
        &self.results
    }

    /// Number of pages for the latest applied results.
    pub fn page_count(&self) -> usize {
        self.results.page_count(self.page_size)
    }

    /// Start a fetch for the current filters and page. Issuing a ticket
    /// invalidates every earlier one.
    pub fn begin(&mut self) -> FetchTicket {
        self.generation += 1;
        self.loading = true;
        FetchTicket {
            generation: self.generation,
            page_size: self.page_size,
            offset: self.offset(),
        }
    }

    /// Apply a fetched page. Returns false, leaving the session untouched, if
    /// a newer fetch has been started since `ticket` was issued.
    pub fn complete(&mut self, ticket: FetchTicket, page: JobPage) -> bool {
        if ticket.generation != self.generation {
            log::debug!(
                "Discarding stale response (generation {} < {})",
                ticket.generation,
                self.generation
            );
            return false;
        }
        self.results = page;
        self.loading = false;
        true
    }

    /// Fetch the current page and apply it.
    pub async fn refresh<A: JobSearchApi>(&mut self, fetcher: &JobFetcher<A>) -> bool {
        let ticket = self.begin();
        let criteria = self.criteria.clone();
        let page = fetcher
            .fetch_page(ticket.page_size, ticket.offset, &criteria)
            .await;
        self.complete(ticket, page)
    }
}
