use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{MediaType, PopularityMode},
    services::{assemble, Assembled, AssemblyRequest, RecommendationQuery},
};

use super::AppState;

/// Query string accepted by the recommendation endpoint.
///
/// Everything arrives as text so a blank or malformed `duration` can degrade
/// to "no ceiling" instead of rejecting the request.
#[derive(Debug, Default)]
pub struct RecommendationParams {
    pub genre: Option<String>,
    pub duration: Option<String>,
    pub id: Option<String>,
    pub mood: Option<String>,
    pub language: Option<String>,
    pub popularity: Option<String>,
    /// The `type` parameter
    pub media_type: Option<String>,
    pub actor: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl RecommendationParams {
    /// Collects known keys from decoded query pairs. When a key repeats, the
    /// first value wins; unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();

        for (key, value) in pairs {
            let slot = match key.as_str() {
                "genre" => &mut params.genre,
                "duration" => &mut params.duration,
                "id" => &mut params.id,
                "mood" => &mut params.mood,
                "language" => &mut params.language,
                "popularity" => &mut params.popularity,
                "type" => &mut params.media_type,
                "actor" => &mut params.actor,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }

        params
    }

    /// Converts raw parameters into an assembler request
    pub fn into_request(self) -> AppResult<AssemblyRequest> {
        let id = match non_empty(self.id) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| AppError::InvalidInput(format!("Invalid id: {}", raw)))?,
            ),
            None => None,
        };

        let duration = non_empty(self.duration).and_then(|raw| match raw.trim().parse::<u32>() {
            Ok(minutes) if minutes > 0 => Some(minutes),
            _ => {
                tracing::debug!(duration = %raw, "Ignoring unusable duration");
                None
            }
        });

        let query = RecommendationQuery {
            genre: non_empty(self.genre),
            duration,
            mood: non_empty(self.mood),
            language: non_empty(self.language),
            popularity: self.popularity.as_deref().and_then(PopularityMode::from_label),
            media_type: self
                .media_type
                .as_deref()
                .map(MediaType::from_label)
                .unwrap_or_default(),
            person_id: None,
        };

        Ok(AssemblyRequest {
            query,
            person: non_empty(self.actor),
            id,
        })
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Recommendation proxy: discovery mode, or single-title detail mode with `id`
pub async fn get_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> AppResult<Response> {
    // Without a credential every request fails the same way, whatever it asks for
    if state.provider.is_none() {
        tracing::error!(request_id = %request_id, "TMDB API key missing");
        return Err(AppError::Configuration);
    }

    let Query(pairs) = query.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let request = RecommendationParams::from_pairs(pairs).into_request()?;

    tracing::info!(
        request_id = %request_id,
        genre = request.query.genre.as_deref(),
        duration = request.query.duration,
        id = request.id,
        "Processing recommendation request"
    );

    let assembled = assemble(state.provider.clone(), &state.settings, request)
        .await
        .map_err(|e| {
            tracing::error!(request_id = %request_id, error = %e, "Recommendation request failed");
            e
        })?;

    let response = match assembled {
        Assembled::Results(results) => {
            tracing::info!(
                request_id = %request_id,
                returned = results.len(),
                "Recommendations completed"
            );
            Json(json!({ "results": results })).into_response()
        }
        Assembled::Detail(detail) => Json(detail).into_response(),
    };

    Ok(response)
}
