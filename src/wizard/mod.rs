//! Client-side recommendation wizard.
//!
//! [`Wizard`] owns all session state: the current step, the selection being
//! built, the results on screen and the open dialogs. A renderer only reads
//! [`Wizard::state`] and calls the action methods. Nothing here ever returns
//! a fetch failure to the caller; failures become an empty result list.

use chrono::NaiveTime;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::Serialize;

use crate::models::{
    selection::MIN_DURATION_MINUTES, MediaType, PopularityMode, RecommendationResult,
    UserSelection,
};
use crate::services::catalog;

pub mod clock;
pub mod share;
pub mod source;
pub mod steps;

pub use clock::{Clock, FixedClock, SystemClock};
pub use source::{ProxyClient, RecommendationSource};
pub use steps::{Transition, WizardFlow, WizardStep};

/// Wizard behaviour knobs
#[derive(Debug, Clone)]
pub struct WizardConfig {
    pub flow: WizardFlow,
    /// How many results to show; `None` shows everything returned
    pub sample_size: Option<usize>,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            flow: WizardFlow::Basic,
            sample_size: Some(6),
        }
    }
}

/// How the last fetch ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultsOutcome {
    Found,
    /// The assembler answered but nothing fit
    NoMatches,
    /// The fetch failed; shown the same way as `NoMatches`
    Unavailable,
}

impl ResultsOutcome {
    /// Whether the "try different preferences" screen applies
    pub fn is_empty(&self) -> bool {
        !matches!(self, ResultsOutcome::Found)
    }
}

/// Everything a renderer needs for one page view
#[derive(Debug, Clone, Serialize)]
pub struct WizardState {
    pub step: WizardStep,
    pub selection: UserSelection,
    pub results: Vec<RecommendationResult>,
    pub loading: bool,
    /// Index into `results` of the open detail dialog
    pub open_detail: Option<usize>,
    pub share_visible: bool,
    pub show_all_genres: bool,
    pub outcome: Option<ResultsOutcome>,
}

impl WizardState {
    fn new() -> Self {
        Self {
            step: WizardStep::Genre,
            selection: UserSelection::new(),
            results: Vec::new(),
            loading: false,
            open_detail: None,
            share_visible: false,
            show_all_genres: false,
            outcome: None,
        }
    }
}

/// Reasons a navigation request is refused
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("{0:?} cannot be entered until the earlier questions are answered")]
    Locked(WizardStep),

    #[error("{transition:?} is not possible from {from:?}")]
    NotAllowed {
        from: WizardStep,
        transition: Transition,
    },
}

/// Step-by-step recommendation wizard
pub struct Wizard<S, C = SystemClock> {
    config: WizardConfig,
    source: S,
    clock: C,
    rng: StdRng,
    state: WizardState,
}

impl<S: RecommendationSource> Wizard<S, SystemClock> {
    /// Wizard on the local wall clock
    pub fn new(source: S, config: WizardConfig) -> Self {
        Self::with_clock(source, SystemClock, config)
    }
}

impl<S: RecommendationSource, C: Clock> Wizard<S, C> {
    pub fn with_clock(source: S, clock: C, config: WizardConfig) -> Self {
        Self {
            config,
            source,
            clock,
            rng: StdRng::from_entropy(),
            state: WizardState::new(),
        }
    }

    /// Fixes the sampling seed so result picks are reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Selections
    // ------------------------------------------------------------------

    /// Genre buttons to show: the short list until "view more" is used
    pub fn genre_options(&self) -> &'static [&'static str] {
        if self.state.show_all_genres {
            catalog::ALL_GENRES
        } else {
            catalog::INITIAL_GENRES
        }
    }

    pub fn show_all_genres(&mut self) {
        self.state.show_all_genres = true;
    }

    pub fn select_genre(&mut self, genre: impl Into<String>) {
        self.state.selection.genre = Some(genre.into());
    }

    pub fn set_bedtime(&mut self, bedtime: NaiveTime) {
        self.state.selection.bedtime = Some(bedtime);
    }

    /// Placeholder for the bedtime picker
    pub fn suggested_bedtime(&self) -> NaiveTime {
        clock::suggested_bedtime(self.clock.now())
    }

    /// Minutes left before bedtime, or the default window with no bedtime
    pub fn available_minutes(&self) -> u32 {
        match self.state.selection.bedtime {
            Some(bedtime) => clock::available_minutes(self.clock.now(), bedtime),
            None => clock::DEFAULT_AVAILABLE_MINUTES,
        }
    }

    /// Sets the watch duration, clamped to 30..=available minutes
    pub fn set_duration(&mut self, minutes: u32) -> u32 {
        let max = self.available_minutes().max(MIN_DURATION_MINUTES);
        let clamped = minutes.clamp(MIN_DURATION_MINUTES, max);
        self.state.selection.duration_minutes = clamped;
        clamped
    }

    pub fn set_mood(&mut self, mood: Option<String>) {
        self.state.selection.mood = mood;
    }

    pub fn set_language(&mut self, language: Option<String>) {
        self.state.selection.language = language;
    }

    pub fn set_popularity(&mut self, popularity: Option<PopularityMode>) {
        self.state.selection.popularity = popularity;
    }

    pub fn set_media_type(&mut self, media_type: Option<MediaType>) {
        self.state.selection.media_type = media_type;
    }

    pub fn set_person(&mut self, person: Option<String>) {
        self.state.selection.person = person.filter(|p| !p.trim().is_empty());
    }

    /// "You'll finish by HH:MM" for a film of `runtime_minutes` started now
    pub fn bedtime_projection(&self, runtime_minutes: u32) -> String {
        clock::format_hhmm(clock::bedtime_projection(self.clock.now(), runtime_minutes))
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    fn target(&self, transition: Transition) -> Result<WizardStep, WizardError> {
        let from = self.state.step;
        let to = self
            .config
            .flow
            .transition(from, transition)
            .ok_or(WizardError::NotAllowed { from, transition })?;

        if !to.can_enter(&self.state.selection) {
            return Err(WizardError::Locked(to));
        }
        Ok(to)
    }

    /// Moves to the next step. Reaching results fetches recommendations.
    pub async fn advance(&mut self) -> Result<WizardStep, WizardError> {
        let to = self.target(Transition::Next)?;

        // Leaving the bedtime step seeds the slider with the whole window
        if self.state.step == WizardStep::Bedtime {
            self.state.selection.duration_minutes = self.available_minutes();
        }

        if to == WizardStep::Results {
            self.find_movies().await;
        } else {
            self.state.step = to;
        }
        Ok(self.state.step)
    }

    pub fn back(&mut self) -> Result<WizardStep, WizardError> {
        let to = self.target(Transition::Back)?;
        self.state.step = to;
        Ok(to)
    }

    /// Jumps from the review step back to one question
    pub fn edit(&mut self, step: WizardStep) -> Result<WizardStep, WizardError> {
        let to = self.target(Transition::Edit(step))?;
        self.state.step = to;
        Ok(to)
    }

    /// Back to the first question. Selections are kept for adjusting.
    pub fn start_over(&mut self) {
        self.state.step = WizardStep::Genre;
        self.state.results.clear();
        self.state.open_detail = None;
        self.state.share_visible = false;
        self.state.outcome = None;
        self.state.loading = false;
    }

    // ------------------------------------------------------------------
    // Results
    // ------------------------------------------------------------------

    /// Fetches, samples and shows recommendations for the current selection.
    ///
    /// Does nothing unless the selection is complete.
    pub async fn find_movies(&mut self) -> Option<ResultsOutcome> {
        if !self.state.selection.is_complete() {
            tracing::debug!("Selection incomplete, not fetching");
            return None;
        }

        let snapshot = self.state.selection.clone();
        self.state.step = WizardStep::Results;
        self.state.loading = true;
        self.state.open_detail = None;

        let outcome = match self.source.fetch(&snapshot).await {
            Ok(all) if all.is_empty() => {
                self.state.results = Vec::new();
                ResultsOutcome::NoMatches
            }
            Ok(all) => {
                self.state.results = self.sample(all);
                ResultsOutcome::Found
            }
            Err(e) => {
                tracing::warn!(error = %e, "Recommendation fetch failed");
                self.state.results = Vec::new();
                ResultsOutcome::Unavailable
            }
        };

        tracing::info!(
            genre = snapshot.genre.as_deref(),
            duration = snapshot.duration_minutes,
            shown = self.state.results.len(),
            outcome = ?outcome,
            "Recommendations updated"
        );

        self.state.outcome = Some(outcome);
        self.state.loading = false;
        Some(outcome)
    }

    /// "Get new movies": same selections, fresh fetch and fresh sample
    pub async fn refresh(&mut self) -> Option<ResultsOutcome> {
        if self.state.step != WizardStep::Results {
            return None;
        }
        self.find_movies().await
    }

    fn sample(&mut self, all: Vec<RecommendationResult>) -> Vec<RecommendationResult> {
        match self.config.sample_size {
            Some(size) => all.choose_multiple(&mut self.rng, size).cloned().collect(),
            None => all,
        }
    }

    /// Opens the detail dialog for one result
    pub fn open_detail(&mut self, index: usize) -> Option<&RecommendationResult> {
        let result = self.state.results.get(index)?;
        self.state.open_detail = Some(index);
        Some(result)
    }

    pub fn close_detail(&mut self) {
        self.state.open_detail = None;
    }

    /// Result shown in the open detail dialog
    pub fn detail(&self) -> Option<&RecommendationResult> {
        self.state
            .open_detail
            .and_then(|index| self.state.results.get(index))
    }

    // ------------------------------------------------------------------
    // Sharing
    // ------------------------------------------------------------------

    /// Opens the share panel and returns the link for the current picks
    pub fn open_share(&mut self, base_url: &str) -> String {
        self.state.share_visible = true;
        share::share_url(base_url, &self.state.selection)
    }

    pub fn close_share(&mut self) {
        self.state.share_visible = false;
    }

    /// Replays a shared link. Returns `false` when the link is incomplete,
    /// leaving the wizard untouched.
    pub async fn replay(&mut self, query: &str) -> bool {
        let Some(selection) = share::from_query_string(query) else {
            return false;
        };

        self.state.selection = selection;
        self.find_movies().await.is_some()
    }
}
