use crate::models::{MediaType, PopularityMode};
use crate::services::catalog;

/// Filters requested by a caller of the recommendation endpoint
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecommendationQuery {
    pub genre: Option<String>,
    /// Runtime ceiling in minutes
    pub duration: Option<u32>,
    pub mood: Option<String>,
    pub language: Option<String>,
    pub popularity: Option<PopularityMode>,
    pub media_type: MediaType,
    /// TMDB person id, resolved from a name before building
    pub person_id: Option<u64>,
}

/// Provider-ready discovery request: endpoint kind plus query parameters
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoverQuery {
    pub media_type: MediaType,
    pub params: Vec<(String, String)>,
}

impl DiscoverQuery {
    /// First value for `key`, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.params.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => self.params.push((key.to_string(), value)),
        }
    }

    fn remove(&mut self, key: &str) {
        self.params.retain(|(k, _)| k != key);
    }
}

/// Translates user filters into TMDB discovery parameters.
///
/// Unknown genre, mood or language labels add no constraint.
pub fn build_discover_query(query: &RecommendationQuery) -> DiscoverQuery {
    let mut discover = DiscoverQuery {
        media_type: query.media_type,
        params: Vec::new(),
    };

    let genre_code = query.genre.as_deref().and_then(catalog::genre_code);
    if let Some(code) = genre_code {
        discover.set("with_genres", code.to_string());
    } else if let Some(codes) = query.mood.as_deref().and_then(catalog::mood_codes) {
        let joined = codes
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join("|");
        discover.set("with_genres", joined);
    }

    if let Some(duration) = query.duration {
        discover.set("with_runtime.lte", duration.to_string());
    }

    if let Some(person_id) = query.person_id {
        discover.set("with_people", person_id.to_string());
    }

    discover.set("sort_by", "popularity.desc");
    discover.set("include_adult", "false");
    discover.set("language", "en-US");
    discover.set("with_original_language", "en");
    discover.set("region", "US");
    discover.set("with_origin_country", "US");

    match query.language.as_deref().and_then(catalog::language_code) {
        Some(Some(code)) => {
            discover.set("with_original_language", code);
            // An origin-country pin would contradict a non-English language
            if code != "en" {
                discover.remove("with_origin_country");
            }
        }
        Some(None) => {
            discover.remove("with_original_language");
            discover.remove("with_origin_country");
        }
        None => {}
    }

    match query.popularity {
        Some(PopularityMode::Mainstream) => {
            discover.set("vote_count.gte", "500");
        }
        Some(PopularityMode::HiddenGems) => {
            discover.set("sort_by", "vote_average.desc");
            discover.set("vote_count.gte", "50");
            discover.set("vote_count.lte", "500");
        }
        None => {}
    }

    discover
}
