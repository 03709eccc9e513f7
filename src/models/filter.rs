//! Filter criteria and result pages.

use serde::{Deserialize, Serialize};

use crate::models::JobAd;

/// The active filters of a search session.
///
/// Locations and branches keep selection order and never hold duplicates.
/// Selection order decides the request order of multi-region fetches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Selected county names, e.g. "Skåne län"
    #[serde(default)]
    pub locations: Vec<String>,

    /// Selected branch labels
    #[serde(default)]
    pub branches: Vec<String>,

    /// Raw free-text search term
    #[serde(default)]
    pub search_term: String,
}

impl FilterCriteria {
    pub fn new<L, B>(locations: L, branches: B, search_term: impl Into<String>) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
        B: IntoIterator,
        B::Item: Into<String>,
    {
        let mut criteria = Self {
            search_term: search_term.into(),
            ..Self::default()
        };
        for location in locations {
            criteria.add_location(location);
        }
        for branch in branches {
            criteria.add_branch(branch);
        }
        criteria
    }

    /// Select a location. Returns false if it was already selected.
    pub fn add_location(&mut self, location: impl Into<String>) -> bool {
        push_unique(&mut self.locations, location.into())
    }

    /// Select a branch. Returns false if it was already selected.
    pub fn add_branch(&mut self, branch: impl Into<String>) -> bool {
        push_unique(&mut self.branches, branch.into())
    }

    /// The search term trimmed and lower-cased, ready for matching.
    pub fn normalized_term(&self) -> String {
        normalize_term(&self.search_term)
    }

    /// Whether a non-blank search term is present.
    pub fn has_search_term(&self) -> bool {
        !self.search_term.trim().is_empty()
    }

    /// No location, branch or search filter is active.
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty() && self.branches.is_empty() && !self.has_search_term()
    }
}

fn push_unique(values: &mut Vec<String>, value: String) -> bool {
    if values.contains(&value) {
        return false;
    }
    values.push(value);
    true
}

/// Normalize a free-text search term: trim, then lower-case.
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPage {
    pub jobs: Vec<JobAd>,
    /// Total number of matches reported by the API
    pub total: usize,
}

impl JobPage {
    pub fn new(jobs: Vec<JobAd>, total: usize) -> Self {
        Self { jobs, total }
    }

    /// The page returned when a fetch fails.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of pages needed to show `total` results.
    pub fn page_count(&self, page_size: usize) -> usize {
        if page_size == 0 {
            return 0;
        }
        self.total.div_ceil(page_size)
    }
}
