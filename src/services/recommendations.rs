use std::sync::Arc;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{CandidateRecord, MediaType, RecommendationResult},
    services::{
        providers::{enrich_batch, MetadataProvider},
        query_builder::{build_discover_query, RecommendationQuery},
    },
};

/// Knobs the assembler takes from configuration
#[derive(Debug, Clone)]
pub struct AssemblySettings {
    /// Prefix for poster URLs
    pub image_base: String,
    /// How many discovered candidates get a detail lookup
    pub batch_size: usize,
}

impl From<&Config> for AssemblySettings {
    fn from(config: &Config) -> Self {
        Self {
            image_base: config.tmdb_image_url.clone(),
            batch_size: config.detail_batch_size,
        }
    }
}

/// What the caller asked the assembler for
#[derive(Debug, Clone, Default)]
pub struct AssemblyRequest {
    pub query: RecommendationQuery,
    /// Actor/director name, resolved to a provider id before discovery
    pub person: Option<String>,
    /// Single-title drill-down; bypasses discovery entirely
    pub id: Option<u64>,
}

/// Assembler output
#[derive(Debug, Clone, PartialEq)]
pub enum Assembled {
    /// Filtered recommendations in provider popularity order. May be empty.
    Results(Vec<RecommendationResult>),
    /// Raw provider detail record for a single title
    Detail(serde_json::Value),
}

/// Turns user filters into a finished recommendation list.
///
/// Without a provider (no credential configured) this fails immediately with
/// [`AppError::Configuration`] and makes no network call.
pub async fn assemble(
    provider: Option<Arc<dyn MetadataProvider>>,
    settings: &AssemblySettings,
    request: AssemblyRequest,
) -> AppResult<Assembled> {
    let provider = provider.ok_or(AppError::Configuration)?;

    if let Some(id) = request.id {
        let detail = provider.details(request.query.media_type, id).await?;
        tracing::info!(id, provider = provider.name(), "Detail lookup completed");
        return Ok(Assembled::Detail(detail));
    }

    let mut query = request.query;

    if let Some(person) = request.person.as_deref().filter(|p| !p.trim().is_empty()) {
        match provider.search_person(person).await? {
            Some(person_id) => query.person_id = Some(person_id),
            None => {
                tracing::info!(person = %person, "No person match, nothing to recommend");
                return Ok(Assembled::Results(Vec::new()));
            }
        }
    }

    let discover = build_discover_query(&query);
    let mut candidates = provider.discover(&discover).await?;
    let discovered = candidates.len();
    candidates.truncate(settings.batch_size);

    let enriched = enrich_batch(Arc::clone(&provider), query.media_type, candidates).await;

    let results = filter_and_map(enriched, query.duration, &settings.image_base);

    tracing::info!(
        genre = query.genre.as_deref().unwrap_or("any"),
        duration = query.duration,
        media_type = %query.media_type,
        discovered,
        returned = results.len(),
        provider = provider.name(),
        "Recommendations assembled"
    );

    Ok(Assembled::Results(results))
}

/// Keeps complete candidates that fit the runtime ceiling, in input order
fn filter_and_map(
    candidates: Vec<CandidateRecord>,
    ceiling: Option<u32>,
    image_base: &str,
) -> Vec<RecommendationResult> {
    candidates
        .into_iter()
        .filter(|c| c.is_complete(ceiling))
        .filter_map(|c| RecommendationResult::from_candidate(c, image_base))
        .collect()
}

/// Convenience for callers that only know the media type of a drill-down
pub fn detail_request(id: u64, media_type: MediaType) -> AssemblyRequest {
    AssemblyRequest {
        query: RecommendationQuery {
            media_type,
            ..Default::default()
        },
        person: None,
        id: Some(id),
    }
}
