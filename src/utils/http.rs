// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::ApiConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &ApiConfig) -> Result<Client> {
    let client = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// GET a URL and decode the JSON body.
///
/// A 404 becomes [`AppError::NotFound`] carrying `context`; any other
/// non-success status becomes [`AppError::Api`].
pub async fn get_json<T: DeserializeOwned>(client: &Client, url: Url, context: &str) -> Result<T> {
    log::debug!("GET {}", url);
    let response = client.get(url).send().await?;
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        return Err(AppError::NotFound(context.to_string()));
    }
    if !status.is_success() {
        return Err(AppError::api(status.as_u16(), context));
    }

    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
