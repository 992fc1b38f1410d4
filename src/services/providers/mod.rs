//! Movie metadata provider abstraction
//!
//! The assembler only talks to this trait, so tests can swap the real TMDB
//! client for a mock and the server can run with no provider at all when the
//! credential is missing.

use std::sync::Arc;

use tracing::instrument;

use crate::{
    error::AppResult,
    models::{CandidateRecord, DetailRecord, MediaType},
    services::query_builder::DiscoverQuery,
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Run one discovery query and return the first page of raw records
    async fn discover(&self, query: &DiscoverQuery) -> AppResult<Vec<CandidateRecord>>;

    /// Fetch the full detail record for one title, untouched
    async fn details(&self, media_type: MediaType, id: u64) -> AppResult<serde_json::Value>;

    /// Resolve a person's name to the provider id of the best match
    async fn search_person(&self, name: &str) -> AppResult<Option<u64>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Backfills runtime and synopsis from a detail lookup.
///
/// Any failure leaves the record as it was; the completeness filter drops it
/// later if it is still missing fields.
#[instrument(skip(provider, candidate), fields(provider = provider.name(), id = candidate.id))]
pub async fn enrich(
    provider: &dyn MetadataProvider,
    media_type: MediaType,
    candidate: CandidateRecord,
) -> CandidateRecord {
    let raw = match provider.details(media_type, candidate.id).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(error = %e, "Detail lookup failed, keeping discovery fields");
            return candidate;
        }
    };

    match serde_json::from_value::<DetailRecord>(raw) {
        Ok(detail) => candidate.merge_detail(detail),
        Err(e) => {
            tracing::warn!(error = %e, "Unreadable detail record, keeping discovery fields");
            candidate
        }
    }
}

/// Enriches every candidate concurrently, one task per candidate.
///
/// Output order matches input order. A task that fails or panics yields the
/// unenriched candidate instead of failing the batch.
pub async fn enrich_batch(
    provider: Arc<dyn MetadataProvider>,
    media_type: MediaType,
    candidates: Vec<CandidateRecord>,
) -> Vec<CandidateRecord> {
    let mut tasks = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let provider = Arc::clone(&provider);
        let fallback = candidate.clone();
        let task =
            tokio::spawn(async move { enrich(provider.as_ref(), media_type, candidate).await });
        tasks.push((fallback, task));
    }

    let mut enriched = Vec::with_capacity(tasks.len());
    let mut failures = 0usize;

    for (fallback, task) in tasks {
        match task.await {
            Ok(candidate) => enriched.push(candidate),
            Err(e) => {
                tracing::error!(error = %e, id = fallback.id, "Enrichment task join error");
                failures += 1;
                enriched.push(fallback);
            }
        }
    }

    if failures > 0 {
        tracing::warn!(
            success_count = enriched.len() - failures,
            error_count = failures,
            "Partial enrichment failure"
        );
    }

    enriched
}
