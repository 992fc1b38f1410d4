use serde::{Deserialize, Serialize};

use crate::models::UserSelection;

/// Named wizard states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Genre,
    Bedtime,
    Duration,
    Mood,
    Language,
    Popularity,
    MediaType,
    Person,
    Review,
    Results,
}

/// Which questions the wizard asks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardFlow {
    /// Genre, bedtime and duration only
    #[default]
    Basic,
    /// Also asks for mood, language, popularity, media type and a person
    Extended,
}

const BASIC_STEPS: &[WizardStep] = &[
    WizardStep::Genre,
    WizardStep::Bedtime,
    WizardStep::Duration,
    WizardStep::Review,
    WizardStep::Results,
];

const EXTENDED_STEPS: &[WizardStep] = &[
    WizardStep::Genre,
    WizardStep::Bedtime,
    WizardStep::Duration,
    WizardStep::Mood,
    WizardStep::Language,
    WizardStep::Popularity,
    WizardStep::MediaType,
    WizardStep::Person,
    WizardStep::Review,
    WizardStep::Results,
];

/// Moves the user can make between steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Next,
    Back,
    /// Jump from the review step back to a question
    Edit(WizardStep),
    StartOver,
}

impl WizardFlow {
    pub fn steps(&self) -> &'static [WizardStep] {
        match self {
            WizardFlow::Basic => BASIC_STEPS,
            WizardFlow::Extended => EXTENDED_STEPS,
        }
    }

    /// Position of `step` in this flow
    pub fn index_of(&self, step: WizardStep) -> Option<usize> {
        self.steps().iter().position(|s| *s == step)
    }

    /// Number of question steps, i.e. everything before results
    pub fn question_count(&self) -> usize {
        self.steps().len() - 1
    }

    /// Transition table. `None` means the move is not allowed from `from`.
    ///
    /// Entry conditions are checked separately with [`WizardStep::can_enter`].
    pub fn transition(&self, from: WizardStep, transition: Transition) -> Option<WizardStep> {
        let steps = self.steps();
        let index = self.index_of(from)?;

        match transition {
            Transition::Next => steps.get(index + 1).copied(),
            Transition::Back => index.checked_sub(1).and_then(|i| steps.get(i)).copied(),
            Transition::Edit(target) => {
                let target_index = self.index_of(target)?;
                (from == WizardStep::Review && target_index < index).then_some(target)
            }
            Transition::StartOver => Some(steps[0]),
        }
    }
}

impl WizardStep {
    /// Whether the selections made so far unlock this step
    pub fn can_enter(&self, selection: &UserSelection) -> bool {
        let has_genre = selection.genre.as_deref().is_some_and(|g| !g.is_empty());
        match self {
            WizardStep::Genre => true,
            WizardStep::Bedtime => has_genre,
            WizardStep::Duration => has_genre && selection.bedtime.is_some(),
            WizardStep::Mood
            | WizardStep::Language
            | WizardStep::Popularity
            | WizardStep::MediaType
            | WizardStep::Person
            | WizardStep::Review
            | WizardStep::Results => selection.is_complete(),
        }
    }
}
