use serde::{Deserialize, Serialize};
use std::fmt::Display;

pub mod selection;
pub mod title;

pub use selection::{PopularityMode, UserSelection};
pub use title::RecommendationResult;

/// Kind of title the provider is asked to discover
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Movie,
    Tv,
}

impl MediaType {
    /// Path segment the provider uses for this media type
    pub fn as_path(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }

    /// Parses the `type` query value; anything unrecognised is a movie
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "tv" | "series" | "show" | "tv_show" => MediaType::Tv,
            _ => MediaType::Movie,
        }
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_path())
    }
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// One entry of a TMDB discovery page, optionally enriched with detail fields.
///
/// TV entries use `name`, `original_name` and `first_air_date`; they are folded
/// onto the movie field names so the rest of the pipeline sees one shape.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CandidateRecord {
    pub id: u64,
    #[serde(default, alias = "name")]
    pub title: Option<String>,
    #[serde(default, alias = "original_name")]
    pub original_title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, alias = "first_air_date")]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub popularity: Option<f64>,
    /// Never present on discovery entries; filled in from the detail lookup
    #[serde(default)]
    pub runtime: Option<u32>,
}

impl CandidateRecord {
    /// Copies authoritative fields from a detail lookup onto this record.
    ///
    /// Runtime always comes from the detail record. The synopsis is only
    /// replaced when the detail one is non-empty.
    pub fn merge_detail(mut self, detail: DetailRecord) -> Self {
        self.runtime = detail.runtime_minutes();
        if let Some(overview) = detail.overview.filter(|o| !o.trim().is_empty()) {
            self.overview = Some(overview);
        }
        self
    }

    /// Poster, synopsis and a positive runtime are all present, and the
    /// runtime fits under `ceiling` when one is given.
    pub fn is_complete(&self, ceiling: Option<u32>) -> bool {
        let has_poster = self.poster_path.as_deref().is_some_and(|p| !p.is_empty());
        let has_overview = self.overview.as_deref().is_some_and(|o| !o.trim().is_empty());

        match self.runtime {
            Some(runtime) if runtime > 0 => {
                has_poster && has_overview && ceiling.map_or(true, |max| runtime <= max)
            }
            _ => false,
        }
    }
}

/// Subset of a TMDB `/movie/{id}` or `/tv/{id}` response used for enrichment
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailRecord {
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub episode_run_time: Vec<u32>,
}

impl DetailRecord {
    /// Movie runtime, or the first listed episode runtime for TV
    pub fn runtime_minutes(&self) -> Option<u32> {
        self.runtime
            .filter(|r| *r > 0)
            .or_else(|| self.episode_run_time.first().copied())
    }
}

/// TMDB `/search/person` hit
#[derive(Debug, Clone, Deserialize)]
pub struct PersonHit {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_candidate() -> CandidateRecord {
        CandidateRecord {
            id: 603,
            title: Some("The Matrix".to_string()),
            overview: Some("A hacker learns the truth.".to_string()),
            poster_path: Some("/matrix.jpg".to_string()),
            release_date: Some("1999-03-30".to_string()),
            vote_average: Some(8.2),
            runtime: Some(136),
            ..Default::default()
        }
    }

    #[test]
    fn test_media_type_labels() {
        assert_eq!(MediaType::from_label("tv"), MediaType::Tv);
        assert_eq!(MediaType::from_label("Series"), MediaType::Tv);
        assert_eq!(MediaType::from_label("movie"), MediaType::Movie);
        assert_eq!(MediaType::from_label("documentary"), MediaType::Movie);
        assert_eq!(format!("{}", MediaType::Tv), "tv");
    }

    #[test]
    fn test_movie_candidate_deserialization() {
        let json = r#"{
            "id": 603,
            "title": "The Matrix",
            "original_title": "The Matrix",
            "overview": "Set in the 22nd century...",
            "poster_path": "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg",
            "release_date": "1999-03-30",
            "vote_average": 8.2,
            "popularity": 81.3,
            "genre_ids": [28, 878]
        }"#;

        let candidate: CandidateRecord = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.id, 603);
        assert_eq!(candidate.title.as_deref(), Some("The Matrix"));
        assert_eq!(candidate.release_date.as_deref(), Some("1999-03-30"));
        assert_eq!(candidate.runtime, None);
    }

    #[test]
    fn test_tv_candidate_deserialization() {
        let json = r#"{
            "id": 1396,
            "name": "Breaking Bad",
            "original_name": "Breaking Bad",
            "first_air_date": "2008-01-20",
            "poster_path": null
        }"#;

        let candidate: CandidateRecord = serde_json::from_str(json).unwrap();
        assert_eq!(candidate.title.as_deref(), Some("Breaking Bad"));
        assert_eq!(candidate.release_date.as_deref(), Some("2008-01-20"));
        assert_eq!(candidate.poster_path, None);
    }

    #[test]
    fn test_merge_detail_prefers_detail_fields() {
        let candidate = CandidateRecord {
            overview: Some("short".to_string()),
            runtime: None,
            ..complete_candidate()
        };
        let detail = DetailRecord {
            runtime: Some(136),
            overview: Some("full synopsis".to_string()),
            episode_run_time: vec![],
        };

        let merged = candidate.merge_detail(detail);
        assert_eq!(merged.runtime, Some(136));
        assert_eq!(merged.overview.as_deref(), Some("full synopsis"));
    }

    #[test]
    fn test_merge_detail_keeps_overview_when_detail_blank() {
        let detail = DetailRecord {
            runtime: None,
            overview: Some(String::new()),
            episode_run_time: vec![],
        };

        let merged = complete_candidate().merge_detail(detail);
        assert_eq!(merged.overview.as_deref(), Some("A hacker learns the truth."));
        assert_eq!(merged.runtime, None);
    }

    #[test]
    fn test_tv_detail_uses_episode_runtime() {
        let detail: DetailRecord =
            serde_json::from_str(r#"{"episode_run_time": [47, 45], "overview": "x"}"#).unwrap();
        assert_eq!(detail.runtime_minutes(), Some(47));
    }

    #[test]
    fn test_is_complete() {
        assert!(complete_candidate().is_complete(None));
        assert!(complete_candidate().is_complete(Some(136)));
        assert!(!complete_candidate().is_complete(Some(135)));

        let no_poster = CandidateRecord {
            poster_path: None,
            ..complete_candidate()
        };
        assert!(!no_poster.is_complete(None));

        let blank_overview = CandidateRecord {
            overview: Some("  ".to_string()),
            ..complete_candidate()
        };
        assert!(!blank_overview.is_complete(None));

        let zero_runtime = CandidateRecord {
            runtime: Some(0),
            ..complete_candidate()
        };
        assert!(!zero_runtime.is_complete(None));
    }
}
