use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::MediaType;

/// Default watch window before a bedtime has been chosen
pub const DEFAULT_DURATION_MINUTES: u32 = 90;

/// Shortest viewing window the wizard will offer
pub const MIN_DURATION_MINUTES: u32 = 30;

/// How strongly results should lean towards well-known titles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopularityMode {
    Mainstream,
    HiddenGems,
}

impl PopularityMode {
    /// Parses a query/label value; unknown labels mean "no preference"
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "mainstream" | "popular" => Some(PopularityMode::Mainstream),
            "hidden_gems" | "hidden_gem" | "obscure" => Some(PopularityMode::HiddenGems),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PopularityMode::Mainstream => "mainstream",
            PopularityMode::HiddenGems => "hidden_gems",
        }
    }
}

/// Everything the user has picked so far in the wizard.
///
/// Built up one step at a time; a recommendation request clones it so later
/// edits never affect a request already in flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSelection {
    pub genre: Option<String>,
    pub bedtime: Option<NaiveTime>,
    pub duration_minutes: u32,
    pub mood: Option<String>,
    pub language: Option<String>,
    pub popularity: Option<PopularityMode>,
    pub media_type: Option<MediaType>,
    /// Actor or director name to filter by
    pub person: Option<String>,
}

impl Default for UserSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl UserSelection {
    /// Creates an empty selection with the default watch window
    pub fn new() -> Self {
        Self {
            genre: None,
            bedtime: None,
            duration_minutes: DEFAULT_DURATION_MINUTES,
            mood: None,
            language: None,
            popularity: None,
            media_type: None,
            person: None,
        }
    }

    /// Genre, bedtime and a usable duration are all set
    pub fn is_complete(&self) -> bool {
        self.genre.as_deref().is_some_and(|g| !g.is_empty())
            && self.bedtime.is_some()
            && self.duration_minutes >= MIN_DURATION_MINUTES
    }

    /// Query parameters for the recommendation proxy.
    ///
    /// Bedtime is not part of the proxy call; it only shapes the duration.
    pub fn proxy_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if let Some(genre) = self.genre.as_ref().filter(|g| !g.is_empty()) {
            params.push(("genre", genre.clone()));
        }
        if self.duration_minutes > 0 {
            params.push(("duration", self.duration_minutes.to_string()));
        }
        if let Some(mood) = &self.mood {
            params.push(("mood", mood.clone()));
        }
        if let Some(language) = &self.language {
            params.push(("language", language.clone()));
        }
        if let Some(popularity) = self.popularity {
            params.push(("popularity", popularity.as_str().to_string()));
        }
        if let Some(media_type) = self.media_type {
            params.push(("type", media_type.as_path().to_string()));
        }
        if let Some(person) = self.person.as_ref().filter(|p| !p.trim().is_empty()) {
            params.push(("actor", person.clone()));
        }

        params
    }
}
