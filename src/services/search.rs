// src/services/search.rs

//! Client for the JobTech search API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{JobAd, JobPage};
use crate::services::filter::SearchParams;
use crate::utils::{endpoint, endpoint_with_query, http::get_json};

/// The search endpoints the fetcher and chart depend on.
#[async_trait]
pub trait JobSearchApi: Send + Sync {
    /// Run one search call.
    async fn search(&self, params: &SearchParams) -> Result<JobPage>;

    /// Fetch a single ad by id.
    async fn job_by_id(&self, id: &str) -> Result<JobAd>;
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<JobAd>,
    #[serde(default)]
    total: SearchTotal,
}

#[derive(Debug, Default, Deserialize)]
struct SearchTotal {
    #[serde(default)]
    value: usize,
}

/// HTTP implementation of [`JobSearchApi`].
pub struct JobSearchClient {
    client: Client,
    base_url: String,
}

impl JobSearchClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl JobSearchApi for JobSearchClient {
    async fn search(&self, params: &SearchParams) -> Result<JobPage> {
        let url = endpoint_with_query(&self.base_url, &["search"], &params.to_query())?;
        let response: SearchResponse = get_json(&self.client, url, "search").await?;

        log::debug!(
            "Search returned {} hits of {} total",
            response.hits.len(),
            response.total.value
        );
        Ok(JobPage::new(response.hits, response.total.value))
    }

    async fn job_by_id(&self, id: &str) -> Result<JobAd> {
        let id = id.trim();
        if id.is_empty() {
            return Err(AppError::invalid_data("job id is empty"));
        }

        let url = endpoint(&self.base_url, &["ad", id])?;
        let job: JobAd = get_json(&self.client, url, id).await?;

        if job.id.trim().is_empty() {
            return Err(AppError::invalid_data(format!("ad {} has no id", id)));
        }
        Ok(job)
    }
}

/// The most recent ads, unfiltered and in full format.
pub async fn recent_jobs<A: JobSearchApi + ?Sized>(api: &A, limit: usize) -> Result<Vec<JobAd>> {
    let params = SearchParams {
        brief: false,
        ..SearchParams::page(limit, 0)
    };
    Ok(api.search(&params).await?.jobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::ServerGuard) -> JobSearchClient {
        JobSearchClient::new(Client::new(), server.url())
    }

    #[tokio::test]
    async fn test_search_parses_hits_and_total() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("limit".into(), "10".into()),
                Matcher::UrlEncoded("offset".into(), "20".into()),
                Matcher::UrlEncoded("format".into(), "brief".into()),
                Matcher::UrlEncoded("q".into(), "kock".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "total": {"value": 42},
                    "hits": [
                        {"id": "1", "headline": "Kock"},
                        {"id": "2", "headline": "Kallskänka"}
                    ]
                }"#,
            )
            .create_async()
            .await;

        let params = SearchParams {
            query: Some("kock".into()),
            ..SearchParams::page(10, 20)
        };
        let page = client_for(&server).search(&params).await.unwrap();

        assert_eq!(page.total, 42);
        assert_eq!(page.jobs.len(), 2);
        assert_eq!(page.jobs[1].headline, "Kallskänka");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_defaults_missing_fields() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let page = client_for(&server)
            .search(&SearchParams::page(5, 0))
            .await
            .unwrap();
        assert_eq!(page, JobPage::empty());
    }

    #[tokio::test]
    async fn test_search_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let err = client_for(&server)
            .search(&SearchParams::page(5, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Api { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_job_by_id() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/ad/29384756")
            .with_status(200)
            .with_body(r#"{"id": "29384756", "headline": "Snickare"}"#)
            .create_async()
            .await;

        let job = client_for(&server).job_by_id("29384756").await.unwrap();
        assert_eq!(job.headline, "Snickare");
    }

    #[tokio::test]
    async fn test_job_by_id_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/ad/missing")
            .with_status(404)
            .create_async()
            .await;

        let err = client_for(&server).job_by_id("missing").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_job_by_id_without_id_is_invalid() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/ad/7")
            .with_status(200)
            .with_body(r#"{"headline": "Utan id"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        assert!(matches!(
            client.job_by_id("7").await,
            Err(AppError::InvalidData(_))
        ));
        assert!(matches!(
            client.job_by_id("  ").await,
            Err(AppError::InvalidData(_))
        ));
    }

    #[tokio::test]
    async fn test_recent_jobs_requests_full_format() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Exact("limit=100&offset=0".into()))
            .with_status(200)
            .with_body(r#"{"total": {"value": 1}, "hits": [{"id": "1"}]}"#)
            .create_async()
            .await;

        let jobs = recent_jobs(&client_for(&server), 100).await.unwrap();
        assert_eq!(jobs.len(), 1);
        mock.assert_async().await;
    }
}
