use serde::{Deserialize, Serialize};

use super::CandidateRecord;

/// Display-ready recommendation returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResult {
    /// Provider identifier, used for the detail drill-down
    pub id: u64,
    pub name: String,
    pub summary: String,
    pub poster_image: Option<String>,
    pub runtime_minutes: u32,
    /// Four-digit year taken from the release date
    pub release_year: Option<String>,
    pub rating: Option<f64>,
}

impl RecommendationResult {
    /// Maps a candidate that already passed the completeness filter.
    ///
    /// Returns `None` when the runtime or synopsis is missing, so an
    /// incomplete candidate can never become a result.
    pub fn from_candidate(candidate: CandidateRecord, image_base: &str) -> Option<Self> {
        let runtime_minutes = candidate.runtime.filter(|r| *r > 0)?;
        let summary = candidate.overview.filter(|o| !o.trim().is_empty())?;

        let name = candidate
            .title
            .filter(|t| !t.is_empty())
            .or(candidate.original_title)
            .unwrap_or_default();

        let poster_image = candidate
            .poster_path
            .filter(|p| !p.is_empty())
            .map(|path| format!("{}{}", image_base.trim_end_matches('/'), path));

        let release_year = candidate
            .release_date
            .as_deref()
            .and_then(|date| date.get(..4))
            .map(str::to_string);

        Some(Self {
            id: candidate.id,
            name,
            summary,
            poster_image,
            runtime_minutes,
            release_year,
            rating: candidate.vote_average,
        })
    }

    /// YouTube search for this title's trailer
    pub fn trailer_search_url(&self) -> String {
        let query = format!("{} official trailer", self.name);
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("search_query", &query)
            .finish();
        format!("https://www.youtube.com/results?{}", encoded)
    }
}
