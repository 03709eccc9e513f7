// src/pipeline/saved.rs

//! Bookmark pipeline: save, remove and mark saved jobs as applied.

use crate::error::{AppError, Result};
use crate::services::{JobFetcher, JobSearchApi};
use crate::storage::SavedJobsStorage;
use crate::store::{JobAction, JobStore};

/// Fetch a job and add it to the saved collection.
///
/// Returns false if the job was already saved.
pub async fn run_save<A, S>(fetcher: &JobFetcher<A>, store: &mut JobStore<S>, id: &str) -> Result<bool>
where
    A: JobSearchApi,
    S: SavedJobsStorage,
{
    if store.contains(id) {
        log::info!("Job {} is already saved", id);
        return Ok(false);
    }

    let job = fetcher.fetch_job(id).await?;
    let headline = job.headline.clone();
    let changed = store.dispatch(JobAction::Add(job)).await?;
    if changed {
        log::info!("Saved {} ({})", id, headline);
    }
    Ok(changed)
}

/// Remove a job from the saved collection.
pub async fn run_remove<S: SavedJobsStorage>(store: &mut JobStore<S>, id: &str) -> Result<()> {
    require_saved(store, id)?;
    store.dispatch(JobAction::Remove(id.to_string())).await?;
    log::info!("Removed {}", id);
    Ok(())
}

/// Flip the applied flag of a saved job. Returns the new flag.
pub async fn run_toggle<S: SavedJobsStorage>(store: &mut JobStore<S>, id: &str) -> Result<bool> {
    require_saved(store, id)?;
    store.dispatch(JobAction::Toggle(id.to_string())).await?;

    let applied = store.get(id).is_some_and(|job| job.is_applied());
    log::info!(
        "{} marked as {}",
        id,
        if applied { "applied" } else { "not applied" }
    );
    Ok(applied)
}

fn require_saved<S: SavedJobsStorage>(store: &JobStore<S>, id: &str) -> Result<()> {
    if store.contains(id) {
        Ok(())
    } else {
        Err(AppError::NotFound(format!("{} is not a saved job", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tempfile::TempDir;

    use crate::models::{JobAd, JobPage, SearchMode};
    use crate::services::SearchParams;
    use crate::storage::LocalStorage;

    struct OneJobApi;

    #[async_trait]
    impl JobSearchApi for OneJobApi {
        async fn search(&self, _params: &SearchParams) -> Result<JobPage> {
            Ok(JobPage::empty())
        }

        async fn job_by_id(&self, id: &str) -> Result<JobAd> {
            if id != "1" {
                return Err(AppError::NotFound(id.to_string()));
            }
            Ok(JobAd {
                id: "1".into(),
                headline: "Lärare".into(),
                ..JobAd::default()
            })
        }
    }

    #[tokio::test]
    async fn test_save_toggle_remove() {
        let tmp = TempDir::new().unwrap();
        let fetcher = JobFetcher::new(OneJobApi, SearchMode::Server);
        let mut store = JobStore::open(LocalStorage::new(tmp.path())).await.unwrap();

        assert!(run_save(&fetcher, &mut store, "1").await.unwrap());
        assert!(!run_save(&fetcher, &mut store, "1").await.unwrap());
        assert_eq!(store.state()[0].applied, Some(false));

        assert!(run_toggle(&mut store, "1").await.unwrap());
        assert!(!run_toggle(&mut store, "1").await.unwrap());

        run_remove(&mut store, "1").await.unwrap();
        assert!(store.state().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_ids() {
        let tmp = TempDir::new().unwrap();
        let fetcher = JobFetcher::new(OneJobApi, SearchMode::Server);
        let mut store = JobStore::open(LocalStorage::new(tmp.path())).await.unwrap();

        assert!(run_save(&fetcher, &mut store, "2").await.unwrap_err().is_not_found());
        assert!(run_toggle(&mut store, "2").await.unwrap_err().is_not_found());
        assert!(run_remove(&mut store, "2").await.unwrap_err().is_not_found());
        assert!(!tmp.path().join("saved_jobs.json").exists());
    }
}
