//! TMDB (The Movie Database) v3 provider
//!
//! API Flow:
//! 1. Discovery: /discover/{movie|tv} → one page (20) of candidates
//! 2. Details: /{movie|tv}/{id} → runtime and full synopsis per candidate
//! 3. Person search: /search/person → id for the `with_people` filter
//!
//! Every call is a fresh round trip: no retries and no caching.

use crate::{
    error::{AppError, AppResult},
    models::{CandidateRecord, MediaType, PersonHit},
    services::{providers::MetadataProvider, query_builder::DiscoverQuery},
};
use reqwest::{Client as HttpClient, Response};
use serde::Deserialize;

const DISCOVER_FAILED: &str = "Failed to fetch recommendations";
const DETAILS_FAILED: &str = "Failed to fetch details";
const PERSON_FAILED: &str = "Failed to search people";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    /// Creates a new TMDB provider
    pub fn new(api_key: String, api_url: String) -> Self {
        Self::with_client(HttpClient::new(), api_key, api_url)
    }

    /// Creates a provider sharing an existing HTTP client
    pub fn with_client(http_client: HttpClient, api_key: String, api_url: String) -> Self {
        Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path.trim_start_matches('/'))
    }

    /// Maps a non-success status to `ProviderStatus`, logging the body
    async fn check_status(response: Response) -> AppResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(
            status = status.as_u16(),
            body = %body,
            provider = "tmdb",
            "TMDB returned non-success status"
        );
        Err(AppError::ProviderStatus(status.as_u16()))
    }
}

/// Pulls the `results` array out of a discovery page
fn parse_discover_page(page: &serde_json::Value) -> AppResult<Vec<CandidateRecord>> {
    let results = page["results"]
        .as_array()
        .ok_or_else(|| AppError::ProviderMalformedResponse("No results from TMDB".to_string()))?;

    // One odd entry should not sink the page; it simply never becomes a candidate
    let candidates = results
        .iter()
        .filter_map(|entry| match serde_json::from_value::<CandidateRecord>(entry.clone()) {
            Ok(candidate) => Some(candidate),
            Err(e) => {
                tracing::debug!(error = %e, "Skipping unreadable discovery entry");
                None
            }
        })
        .collect();

    Ok(candidates)
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn discover(&self, query: &DiscoverQuery) -> AppResult<Vec<CandidateRecord>> {
        let url = self.endpoint(&format!("discover/{}", query.media_type.as_path()));

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(&query.params)
            .send()
            .await
            .map_err(|e| AppError::unavailable(DISCOVER_FAILED, e))?;

        let response = Self::check_status(response).await?;

        let page: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::unavailable(DISCOVER_FAILED, e))?;

        let candidates = parse_discover_page(&page)?;

        tracing::info!(
            media_type = %query.media_type,
            results = candidates.len(),
            provider = "tmdb",
            "Discovery completed"
        );

        Ok(candidates)
    }

    async fn details(&self, media_type: MediaType, id: u64) -> AppResult<serde_json::Value> {
        let url = self.endpoint(&format!("{}/{}", media_type.as_path(), id));

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| AppError::unavailable(DETAILS_FAILED, e))?;

        let response = Self::check_status(response).await?;

        let details: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AppError::unavailable(DETAILS_FAILED, e))?;

        tracing::debug!(id, media_type = %media_type, provider = "tmdb", "Details fetched");

        Ok(details)
    }

    async fn search_person(&self, name: &str) -> AppResult<Option<u64>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let url = self.endpoint("search/person");

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", name),
                ("include_adult", "false"),
            ])
            .send()
            .await
            .map_err(|e| AppError::unavailable(PERSON_FAILED, e))?;

        let response = Self::check_status(response).await?;

        #[derive(Deserialize)]
        struct SearchResponse {
            #[serde(default)]
            results: Vec<PersonHit>,
        }

        let search: SearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::unavailable(PERSON_FAILED, e))?;

        let hit = search.results.into_iter().next();

        tracing::info!(
            query = %name,
            person_id = hit.as_ref().map(|h| h.id),
            matched_name = hit.as_ref().and_then(|h| h.name.as_deref()),
            provider = "tmdb",
            "Person search completed"
        );

        Ok(hit.map(|h| h.id))
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
