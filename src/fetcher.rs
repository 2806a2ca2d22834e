use std::future::Future;

use reqwest::Url;
use thiserror::Error;

use crate::data_models::{ClaimPage, ClaimSearchResponse, PaginationCursor};

pub const DEFAULT_API_URL: &str = "https://factchecktools.googleapis.com/v1alpha1/claims:search";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The endpoint answered with a non-success status.
    #[error("Network error: HTTP error {status}")]
    Network { status: u16 },
    /// Anything else: connect failures, unreadable or malformed bodies.
    #[error("Error: {}", or_unknown(.message))]
    Request { message: String },
}

fn or_unknown(message: &str) -> &str {
    if message.is_empty() {
        "Unknown error"
    } else {
        message
    }
}

impl FetchError {
    pub fn request(err: impl std::fmt::Display) -> Self {
        FetchError::Request {
            message: err.to_string(),
        }
    }
}

/// Source of result pages. One call is one network round trip.
pub trait PageFetcher: Send + Sync {
    fn fetch(
        &self,
        query: &str,
        cursor: Option<&PaginationCursor>,
    ) -> impl Future<Output = Result<ClaimPage, FetchError>> + Send;
}

/// Client for the Fact Check Tools `claims:search` endpoint.
#[derive(Debug, Clone)]
pub struct FactCheckClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    language_code: Option<String>,
    page_size: Option<u32>,
}

impl FactCheckClient {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            api_key: api_key.into(),
            language_code: None,
            page_size: None,
        })
    }

    pub fn with_language_code(mut self, language_code: Option<String>) -> Self {
        self.language_code = language_code;
        self
    }

    pub fn with_page_size(mut self, page_size: Option<u32>) -> Self {
        self.page_size = page_size;
        self
    }

    /// Builds the request URL. The key is included, so never log the result.
    pub fn request_url(&self, query: &str, cursor: Option<&PaginationCursor>) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut params = url.query_pairs_mut();
            params.append_pair("key", &self.api_key);
            params.append_pair("query", query);
            if let Some(cursor) = cursor {
                params.append_pair("pageToken", cursor.as_str());
            }
            if let Some(lang) = &self.language_code {
                params.append_pair("languageCode", lang);
            }
            if let Some(size) = self.page_size {
                params.append_pair("pageSize", &size.to_string());
            }
        }
        url
    }
}

impl PageFetcher for FactCheckClient {
    async fn fetch(
        &self,
        query: &str,
        cursor: Option<&PaginationCursor>,
    ) -> Result<ClaimPage, FetchError> {
        let url = self.request_url(query, cursor);
        tracing::debug!(query, has_cursor = cursor.is_some(), "fetching claims page");

        let res = self.http.get(url).send().await.map_err(|e| {
            let e = e.without_url();
            tracing::error!("claims request failed: {:#}", e);
            FetchError::request(e)
        })?;

        let status = res.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "claims endpoint returned failure");
            return Err(FetchError::Network {
                status: status.as_u16(),
            });
        }

        let body = res
            .json::<ClaimSearchResponse>()
            .await
            .map_err(|e| FetchError::request(e.without_url()))?;
        let page = ClaimPage::from(body);
        tracing::info!(
            query,
            items = page.items.len(),
            more = page.next_cursor.is_some(),
            "fetched claims page"
        );
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_first_page() {
        let client = FactCheckClient::new(DEFAULT_API_URL, "secret").unwrap();
        let url = client.request_url("flu vaccine", None);
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("key".to_string(), "secret".to_string()),
                ("query".to_string(), "flu vaccine".to_string()),
            ]
        );
        assert_eq!(url.path(), "/v1alpha1/claims:search");
    }

    #[test]
    fn test_request_url_with_cursor_and_extras() {
        let client = FactCheckClient::new(DEFAULT_API_URL, "secret")
            .unwrap()
            .with_language_code(Some("en".into()))
            .with_page_size(Some(5));
        let cursor = PaginationCursor::new("abc");
        let url = client.request_url("q&a", Some(&cursor));
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("pageToken".into(), "abc".into())));
        assert!(pairs.contains(&("query".into(), "q&a".into())));
        assert!(pairs.contains(&("languageCode".into(), "en".into())));
        assert!(pairs.contains(&("pageSize".into(), "5".into())));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FetchError::Network { status: 403 }.to_string(),
            "Network error: HTTP error 403"
        );
        assert_eq!(FetchError::request("boom").to_string(), "Error: boom");
        assert_eq!(FetchError::request("").to_string(), "Error: Unknown error");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(FactCheckClient::new("not a url", "k").is_err());
    }
}
