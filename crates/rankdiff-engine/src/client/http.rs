//! HTTP ranking client.
//!
//! One blocking `POST` per query against the configured search endpoint.

#![allow(clippy::result_large_err)]

use std::time::Duration;

use rankdiff_core::errors::{ExError, ExErrorKind, RankDiffError};
use rankdiff_core::ranking::{RankingClient, RankingResponse};
use rankdiff_core_types::Sensitive;
use reqwest::blocking::{Client, Response};
use serde::Serialize;

use crate::config::RankingConfig;

/// Longest slice of an error body carried into the error message
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Search request body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankingRequest<'a> {
    pub query: &'a str,
    pub collection: &'a str,
    pub filters: RequestFilters,
    pub enable_auto_detect_filters: bool,
    pub search_type: &'a str,
    pub offset: u32,
    pub favor_recent: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequestFilters {
    pub source_type: Option<String>,
}

/// [`RankingClient`] backed by a reqwest blocking client
pub struct HttpRankingClient {
    client: Client,
    endpoint: String,
    collection: String,
    search_type: String,
    favor_recent: bool,
    api_key: Option<Sensitive<String>>,
}

impl HttpRankingClient {
    /// Build a client from the `[ranking]` config section.
    ///
    /// # Errors
    ///
    /// `Configuration` if the underlying HTTP client cannot be built.
    pub fn new(config: &RankingConfig) -> Result<Self, ExError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .user_agent(concat!("rankdiff/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                ExError::from(RankDiffError::ConfigurationError {
                    reason: format!("failed to create HTTP client: {}", e),
                })
                .with_op("http_client")
            })?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            collection: config.collection.clone(),
            search_type: config.search_type.clone(),
            favor_recent: config.favor_recent,
            api_key: config.api_key.clone(),
        })
    }

    /// Body sent for `query`
    pub fn request_body<'a>(&'a self, query: &'a str) -> RankingRequest<'a> {
        RankingRequest {
            query,
            collection: &self.collection,
            filters: RequestFilters::default(),
            enable_auto_detect_filters: true,
            search_type: &self.search_type,
            offset: 0,
            favor_recent: self.favor_recent,
        }
    }
}

impl RankingClient for HttpRankingClient {
    fn rank(&self, query: &str) -> Result<RankingResponse, ExError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&self.request_body(query));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key.expose());
        }

        let response = request.send().map_err(|e| {
            upstream_error(query, format!("request to {} failed: {}", self.endpoint, e))
        })?;
        let response = validate_response_status(response, query)?;

        response
            .json::<RankingResponse>()
            .map_err(|e| upstream_error(query, format!("undecodable response body: {}", e)))
    }
}

fn validate_response_status(response: Response, query: &str) -> Result<Response, ExError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().unwrap_or_default();
    let snippet: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
    Err(upstream_error(
        query,
        format!("HTTP {}: {}", status.as_u16(), snippet.trim()),
    ))
}

fn upstream_error(query: &str, message: String) -> ExError {
    ExError::new(ExErrorKind::Upstream)
        .with_op("rank_query")
        .with_query(query)
        .with_message(message)
}
