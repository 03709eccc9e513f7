//! Utility functions and helpers.

pub mod http;

use url::Url;

use crate::error::{AppError, Result};

/// Build an endpoint URL from a base URL and path segments.
///
/// The base may carry a path of its own (e.g. `/v1/taxonomy`); segments are
/// appended to it and percent-encoded.
pub fn endpoint(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url = Url::parse(base)?;
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| AppError::config(format!("{} cannot be used as a base URL", base)))?;
        path.pop_if_empty();
        path.extend(segments);
    }
    Ok(url)
}

/// Build an endpoint URL with query parameters appended in order.
pub fn endpoint_with_query<K, V>(base: &str, segments: &[&str], query: &[(K, V)]) -> Result<Url>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut url = endpoint(base, segments)?;
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key.as_ref(), value.as_ref());
        }
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_appends_to_base_path() {
        let url = endpoint("https://taxonomy.example.se/v1/taxonomy", &["occupation-fields"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://taxonomy.example.se/v1/taxonomy/occupation-fields"
        );
    }

    #[test]
    fn test_endpoint_handles_trailing_slash() {
        let url = endpoint("https://jobsearch.example.se/", &["ad", "123"]).unwrap();
        assert_eq!(url.as_str(), "https://jobsearch.example.se/ad/123");
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let url = endpoint("https://jobsearch.example.se", &["ad", "a b/c"]).unwrap();
        assert_eq!(url.as_str(), "https://jobsearch.example.se/ad/a%20b%2Fc");
    }

    #[test]
    fn test_endpoint_with_query_keeps_order() {
        let url = endpoint_with_query(
            "https://jobsearch.example.se",
            &["search"],
            &[("limit", "10"), ("offset", "0"), ("q", "kock malmö")],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://jobsearch.example.se/search?limit=10&offset=0&q=kock+malm%C3%B6"
        );
    }

    #[test]
    fn test_endpoint_rejects_invalid_base() {
        assert!(matches!(endpoint("not a url", &["search"]), Err(AppError::Url(_))));
        assert!(matches!(
            endpoint("mailto:jobb@example.se", &["search"]),
            Err(AppError::Config(_))
        ));
    }
}
