// src/services/chart.rs

//! Region statistics: how many of the latest ads were published per region
//! within a recent time window.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::models::JobAd;
use crate::services::search::{JobSearchApi, recent_jobs};

/// Label used for ads without a workplace region.
pub const UNKNOWN_REGION: &str = "Okänd region";

pub const CHART_TITLE: &str = "Dagens jobb per region";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionCount {
    pub region: String,
    pub count: usize,
}

/// Jobs published within `window` before `now`. Jobs with a missing or
/// unparseable publication date, or one in the future, are left out.
///
/// A window reaching past the earliest representable time keeps every past job.
pub fn published_within(jobs: Vec<JobAd>, now: DateTime<Utc>, window: Duration) -> Vec<JobAd> {
    let since = now
        .checked_sub_signed(window)
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    jobs.into_iter()
        .filter(|job| {
            job.published_at()
                .is_some_and(|published| published >= since && published <= now)
        })
        .collect()
}

/// Count jobs per region, in the order regions are first seen.
pub fn count_by_region(jobs: &[JobAd]) -> Vec<RegionCount> {
    let mut counts: Vec<RegionCount> = Vec::new();

    for job in jobs {
        let region = job
            .region()
            .filter(|r| !r.is_empty())
            .unwrap_or(UNKNOWN_REGION);

        match counts.iter_mut().find(|c| c.region == region) {
            Some(entry) => entry.count += 1,
            None => counts.push(RegionCount {
                region: region.to_string(),
                count: 1,
            }),
        }
    }
    counts
}

/// Fetch the latest `limit` ads and count those published within the last
/// `window_hours` per region.
///
/// A failed fetch, or a window that is not a positive number of hours, is
/// logged and yields no statistics.
pub async fn region_statistics<A: JobSearchApi + ?Sized>(
    api: &A,
    limit: usize,
    window_hours: i64,
    now: DateTime<Utc>,
) -> Vec<RegionCount> {
    let Some(window) = Duration::try_hours(window_hours).filter(|_| window_hours > 0) else {
        log::warn!("Invalid chart window of {}h", window_hours);
        return Vec::new();
    };

    let jobs = match recent_jobs(api, limit).await {
        Ok(jobs) => jobs,
        Err(e) => {
            log::error!("Failed to fetch chart jobs: {}", e);
            return Vec::new();
        }
    };

    let fetched = jobs.len();
    let recent = published_within(jobs, now, window);
    log::debug!("{} of {} fetched ads are within {}h", recent.len(), fetched, window_hours);

    count_by_region(&recent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::error::{AppError, Result};
    use crate::models::{JobPage, WorkplaceAddress};
    use crate::services::filter::SearchParams;

    fn job(id: &str, region: Option<&str>, published: &str) -> JobAd {
        JobAd {
            id: id.into(),
            publication_date: published.into(),
            workplace_address: region.map(|r| WorkplaceAddress {
                region: Some(r.into()),
                ..WorkplaceAddress::default()
            }),
            ..JobAd::default()
        }
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-10-18T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    struct StaticApi(Option<Vec<JobAd>>);

    #[async_trait]
    impl JobSearchApi for StaticApi {
        async fn search(&self, params: &SearchParams) -> Result<JobPage> {
            assert!(!params.brief);
            match &self.0 {
                Some(jobs) => Ok(JobPage::new(jobs.clone(), jobs.len())),
                None => Err(AppError::api(502, "search")),
            }
        }

        async fn job_by_id(&self, id: &str) -> Result<JobAd> {
            Err(AppError::NotFound(id.to_string()))
        }
    }

    #[test]
    fn test_count_by_region_keeps_first_seen_order() {
        let jobs = vec![
            job("1", Some("Skåne län"), ""),
            job("2", None, ""),
            job("3", Some("Stockholms län"), ""),
            job("4", Some("Skåne län"), ""),
            job("5", Some(""), ""),
        ];

        let counts = count_by_region(&jobs);
        assert_eq!(
            counts,
            vec![
                RegionCount { region: "Skåne län".into(), count: 2 },
                RegionCount { region: UNKNOWN_REGION.into(), count: 2 },
                RegionCount { region: "Stockholms län".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_published_within_window() {
        let jobs = vec![
            job("recent", None, "2026-10-18T09:00:00"),
            job("edge", None, "2026-10-17T12:00:00Z"),
            job("old", None, "2026-10-17T11:59:59"),
            job("future", None, "2026-10-18T13:00:00"),
            job("undated", None, ""),
        ];

        let kept = published_within(jobs, now(), Duration::hours(24));
        let ids: Vec<&str> = kept.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["recent", "edge"]);
    }

    #[tokio::test]
    async fn test_region_statistics() {
        let api = StaticApi(Some(vec![
            job("1", Some("Uppsala län"), "2026-10-18T10:00:00"),
            job("2", Some("Uppsala län"), "2026-10-01T10:00:00"),
            job("3", Some("Gotlands län"), "2026-10-18T11:00:00"),
        ]));

        let counts = region_statistics(&api, 100, 24, now()).await;
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].region, "Uppsala län");
        assert_eq!(counts[0].count, 1);
    }

    #[test]
    fn test_published_within_huge_window_keeps_past_jobs() {
        let jobs = vec![
            job("old", None, "1999-01-01T00:00:00"),
            job("future", None, "2026-10-18T13:00:00"),
        ];

        let kept = published_within(jobs, now(), Duration::MAX);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "old");
    }

    #[tokio::test]
    async fn test_region_statistics_rejects_bad_window() {
        let api = StaticApi(Some(vec![job("1", Some("Uppsala län"), "2026-10-18T10:00:00")]));

        for hours in [0, -5, i64::MAX / 2, i64::MIN] {
            assert!(region_statistics(&api, 100, hours, now()).await.is_empty(), "{hours}");
        }
    }

    #[tokio::test]
    async fn test_region_statistics_empty_on_error() {
        let counts = region_statistics(&StaticApi(None), 100, 24, now()).await;
        assert!(counts.is_empty());
    }
}
