//! Transitions of the saved jobs collection.

use crate::models::JobAd;

/// A change to the saved jobs collection.
#[derive(Debug, Clone, PartialEq)]
pub enum JobAction {
    /// Save a job. Ignored if a job with the same id is already saved.
    Add(JobAd),
    /// Remove the job with this id.
    Remove(String),
    /// Flip the applied flag of the job with this id.
    Toggle(String),
}

impl JobAction {
    /// Id of the job the action targets.
    pub fn job_id(&self) -> &str {
        match self {
            Self::Add(job) => &job.id,
            Self::Remove(id) | Self::Toggle(id) => id,
        }
    }
}

/// Apply an action to the saved collection, returning the new collection.
///
/// Actions targeting an unknown id (or adding a known one) return the
/// collection unchanged.
pub fn reduce(jobs: &[JobAd], action: &JobAction) -> Vec<JobAd> {
    match action {
        JobAction::Add(job) => {
            let mut next = jobs.to_vec();
            if !jobs.iter().any(|saved| saved.id == job.id) {
                next.push(JobAd {
                    applied: Some(false),
                    ..job.clone()
                });
            }
            next
        }
        JobAction::Remove(id) => jobs.iter().filter(|job| job.id != *id).cloned().collect(),
        JobAction::Toggle(id) => jobs
            .iter()
            .map(|job| {
                if job.id == *id {
                    JobAd {
                        applied: Some(!job.is_applied()),
                        ..job.clone()
                    }
                } else {
                    job.clone()
                }
            })
            .collect(),
    }
}
