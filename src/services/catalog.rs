//! Static lookup tables translating wizard labels into TMDB vocabulary.
//!
//! Labels are matched exactly: "Sci-Fi" and "sci-fi" are different keys.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Genres offered before the user asks for the full list
pub const INITIAL_GENRES: &[&str] = &["Action", "Comedy", "Drama", "Horror", "Romance", "Sci-Fi"];

/// Every genre the wizard can show
pub const ALL_GENRES: &[&str] = &[
    "Action",
    "Adventure",
    "Animation",
    "Comedy",
    "Crime",
    "Drama",
    "Fantasy",
    "Horror",
    "Mystery",
    "Romance",
    "Science Fiction",
    "Sci-Fi",
    "Thriller",
    "Documentary",
];

/// Human-readable genre name → TMDB genre id
pub static GENRE_CODES: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    HashMap::from([
        ("Action", 28),
        ("Adventure", 12),
        ("Animation", 16),
        ("Comedy", 35),
        ("Crime", 80),
        ("Documentary", 99),
        ("Drama", 18),
        ("Family", 10751),
        ("Fantasy", 14),
        ("History", 36),
        ("Horror", 27),
        ("Music", 10402),
        ("Mystery", 9648),
        ("Romance", 10749),
        ("Science Fiction", 878),
        ("Sci-Fi", 878),
        ("TV Movie", 10770),
        ("Thriller", 53),
        ("War", 10752),
        ("Western", 37),
    ])
});

/// Mood label → genre ids, any of which satisfies the mood
pub static MOOD_CODES: Lazy<HashMap<&'static str, Vec<u32>>> = Lazy::new(|| {
    HashMap::from([
        ("Happy", vec![35, 10751, 16]),
        ("Excited", vec![28, 12, 878]),
        ("Scared", vec![27, 53]),
        ("Romantic", vec![10749]),
        ("Thoughtful", vec![18, 99, 36]),
        ("Mysterious", vec![9648, 80]),
        ("Relaxed", vec![35, 10402, 16]),
    ])
});

/// Language label → ISO 639-1 code. `None` means no language pin.
pub static LANGUAGE_CODES: Lazy<HashMap<&'static str, Option<&'static str>>> = Lazy::new(|| {
    HashMap::from([
        ("Any", None),
        ("English", Some("en")),
        ("Spanish", Some("es")),
        ("French", Some("fr")),
        ("German", Some("de")),
        ("Italian", Some("it")),
        ("Japanese", Some("ja")),
        ("Korean", Some("ko")),
        ("Hindi", Some("hi")),
        ("Chinese", Some("zh")),
    ])
});

pub fn genre_code(label: &str) -> Option<u32> {
    GENRE_CODES.get(label).copied()
}

pub fn mood_codes(label: &str) -> Option<&'static [u32]> {
    MOOD_CODES.get(label).map(Vec::as_slice)
}

/// Outer `None`: unknown label. Inner `None`: the "Any" label.
pub fn language_code(label: &str) -> Option<Option<&'static str>> {
    LANGUAGE_CODES.get(label).copied()
}
