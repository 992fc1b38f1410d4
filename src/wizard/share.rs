//! Shareable links: the selection mirrored into a query string.
//!
//! This is the only persistence the wizard has. Opening a link that carries
//! `genre`, `sleepTime` and `duration` replays those picks.

use url::form_urlencoded;

use crate::models::{selection::MIN_DURATION_MINUTES, MediaType, PopularityMode, UserSelection};
use crate::wizard::clock::{format_hhmm, parse_hhmm};

/// Query string for `selection`, without the leading `?`
pub fn to_query_string(selection: &UserSelection) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    if let Some(genre) = &selection.genre {
        serializer.append_pair("genre", genre);
    }
    if let Some(bedtime) = selection.bedtime {
        serializer.append_pair("sleepTime", &format_hhmm(bedtime));
    }
    serializer.append_pair("duration", &selection.duration_minutes.to_string());

    if let Some(mood) = &selection.mood {
        serializer.append_pair("mood", mood);
    }
    if let Some(language) = &selection.language {
        serializer.append_pair("language", language);
    }
    if let Some(popularity) = selection.popularity {
        serializer.append_pair("popularity", popularity.as_str());
    }
    if let Some(media_type) = selection.media_type {
        serializer.append_pair("type", media_type.as_path());
    }
    if let Some(person) = &selection.person {
        serializer.append_pair("actor", person);
    }

    serializer.finish()
}

/// Full link for the results page at `base_url`
pub fn share_url(base_url: &str, selection: &UserSelection) -> String {
    let base = base_url.split('?').next().unwrap_or(base_url);
    format!("{}?{}", base, to_query_string(selection))
}

/// Rebuilds a selection from a link's query string.
///
/// Returns `None` unless genre, a valid `HH:MM` sleep time and a numeric
/// duration are all present. A leading `?` is accepted.
pub fn from_query_string(query: &str) -> Option<UserSelection> {
    let query = query.trim_start_matches('?');
    let mut selection = UserSelection::new();
    let mut duration = None;

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let value = value.into_owned();
        if value.is_empty() {
            continue;
        }
        match key.as_ref() {
            "genre" => selection.genre = Some(value),
            "sleepTime" => selection.bedtime = parse_hhmm(&value),
            "duration" => duration = value.trim().parse::<u32>().ok(),
            "mood" => selection.mood = Some(value),
            "language" => selection.language = Some(value),
            "popularity" => selection.popularity = PopularityMode::from_label(&value),
            "type" => selection.media_type = Some(MediaType::from_label(&value)),
            "actor" => selection.person = Some(value),
            _ => {}
        }
    }

    selection.genre.as_ref()?;
    selection.bedtime?;
    selection.duration_minutes = duration?.max(MIN_DURATION_MINUTES);

    Some(selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn selection() -> UserSelection {
        let mut selection = UserSelection::new();
        selection.genre = Some("Science Fiction".to_string());
        selection.bedtime = NaiveTime::from_hms_opt(23, 30, 0);
        selection.duration_minutes = 105;
        selection
    }

    #[test]
    fn test_query_string_uses_link_parameter_names() {
        assert_eq!(
            to_query_string(&selection()),
            "genre=Science+Fiction&sleepTime=23%3A30&duration=105"
        );
    }

    #[test]
    fn test_share_url_replaces_existing_query() {
        let url = share_url("https://reelax.example/?genre=Drama", &selection());
        assert!(url.starts_with("https://reelax.example/?genre=Science+Fiction"));
        assert_eq!(url.matches('?').count(), 1);
    }

    #[test]
    fn test_link_replays_selection() {
        let mut original = selection();
        original.mood = Some("Excited".to_string());
        original.media_type = Some(MediaType::Tv);
        original.person = Some("Sigourney Weaver".to_string());

        let replayed = from_query_string(&format!("?{}", to_query_string(&original))).unwrap();
        assert_eq!(replayed, original);
    }

    #[test]
    fn test_incomplete_links_do_not_replay() {
        assert!(from_query_string("").is_none());
        assert!(from_query_string("genre=Drama&duration=90").is_none());
        assert!(from_query_string("genre=Drama&sleepTime=late&duration=90").is_none());
        assert!(from_query_string("genre=Drama&sleepTime=23:00&duration=abc").is_none());
        assert!(from_query_string("sleepTime=23:00&duration=90").is_none());
    }

    #[test]
    fn test_short_duration_is_raised_to_floor() {
        let replayed = from_query_string("genre=Drama&sleepTime=23:00&duration=10").unwrap();
        assert_eq!(replayed.duration_minutes, 30);
    }
}
