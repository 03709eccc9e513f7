//! The saved jobs store.
//!
//! [`JobStore`] owns the saved collection. It only changes through
//! [`reduce`], and every change is written to storage before
//! [`JobStore::dispatch`] returns.

mod reducer;

pub use reducer::{JobAction, reduce};

use crate::error::Result;
use crate::models::JobAd;
use crate::storage::SavedJobsStorage;

pub struct JobStore<S> {
    storage: S,
    jobs: Vec<JobAd>,
}

impl<S: SavedJobsStorage> JobStore<S> {
    /// Open a store, loading the saved collection from storage.
    pub async fn open(storage: S) -> Result<Self> {
        let jobs = storage.load().await?;
        log::debug!("Loaded {} saved jobs", jobs.len());
        Ok(Self { storage, jobs })
    }

    /// The saved collection in save order.
    pub fn state(&self) -> &[JobAd] {
        &self.jobs
    }

    /// Saved jobs not yet applied for.
    pub fn saved(&self) -> Vec<&JobAd> {
        self.jobs.iter().filter(|job| !job.is_applied()).collect()
    }

    /// Saved jobs marked as applied for.
    pub fn applied(&self) -> Vec<&JobAd> {
        self.jobs.iter().filter(|job| job.is_applied()).collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.jobs.iter().any(|job| job.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&JobAd> {
        self.jobs.iter().find(|job| job.id == id)
    }

    /// Apply an action and persist the result.
    ///
    /// Returns whether the collection changed. If writing fails the new
    /// state is kept in memory and the error is returned.
    pub async fn dispatch(&mut self, action: JobAction) -> Result<bool> {
        let next = reduce(&self.jobs, &action);
        if next == self.jobs {
            log::debug!("{} on {} left saved jobs unchanged", kind(&action), action.job_id());
            return Ok(false);
        }

        self.jobs = next;
        if let Err(e) = self.storage.save(&self.jobs).await {
            log::error!("Failed to persist saved jobs: {}", e);
            return Err(e);
        }
        Ok(true)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

fn kind(action: &JobAction) -> &'static str {
    match action {
        JobAction::Add(_) => "add",
        JobAction::Remove(_) => "remove",
        JobAction::Toggle(_) => "toggle",
    }
}
