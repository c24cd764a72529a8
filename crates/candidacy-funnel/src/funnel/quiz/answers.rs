use std::collections::BTreeMap;

/// 1-based index of a quiz step. Step 0 is never valid.
pub type StepIndex = u8;

/// Raw answers keyed by step. Values are untyped on purpose: option tokens,
/// stringified slider values, and the skip sentinel all live side by side, and
/// re-answering a step overwrites the previous value. Typing happens at the
/// classifier boundary through [`AnswerSheet`].
pub type AnswerMap = BTreeMap<StepIndex, String>;

/// Sentinel stored when an optional question is skipped.
pub const SKIPPED: &str = "skipped";

/// Step indices carrying classifier signals in the standard catalog.
pub mod step {
    use super::StepIndex;

    pub const AREA: StepIndex = 1;
    pub const TIMELINE: StepIndex = 2;
    pub const PROGRESSION: StepIndex = 3;
    pub const PREVIOUS_TREATMENTS: StepIndex = 4;
    pub const GOAL: StepIndex = 5;
    pub const PERSONA: StepIndex = 6;
    pub const OPENNESS: StepIndex = 7;
}

/// Where the visitor is losing hair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HairLossArea {
    Crown,
    Hairline,
    Diffuse,
    Patches,
}

impl HairLossArea {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "crown" => Some(Self::Crown),
            "hairline" => Some(Self::Hairline),
            "diffuse" => Some(Self::Diffuse),
            "patches" => Some(Self::Patches),
            _ => None,
        }
    }

    pub const fn token(self) -> &'static str {
        match self {
            Self::Crown => "crown",
            Self::Hairline => "hairline",
            Self::Diffuse => "diffuse",
            Self::Patches => "patches",
        }
    }
}

/// How long ago the thinning started, most recent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OnsetTimeline {
    UnderSixMonths,
    SixToTwelveMonths,
    OneToTwoYears,
    OverTwoYears,
}

impl OnsetTimeline {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "under_6_months" => Some(Self::UnderSixMonths),
            "6_to_12_months" => Some(Self::SixToTwelveMonths),
            "1_to_2_years" => Some(Self::OneToTwoYears),
            "over_2_years" => Some(Self::OverTwoYears),
            _ => None,
        }
    }

    pub const fn token(self) -> &'static str {
        match self {
            Self::UnderSixMonths => "under_6_months",
            Self::SixToTwelveMonths => "6_to_12_months",
            Self::OneToTwoYears => "1_to_2_years",
            Self::OverTwoYears => "over_2_years",
        }
    }

    /// Inside the window where follicles respond best.
    pub const fn is_recent(self) -> bool {
        matches!(self, Self::UnderSixMonths | Self::SixToTwelveMonths)
    }
}

/// Whether the loss is still moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progression {
    Accelerating,
    SomewhatWorse,
    Stable,
}

impl Progression {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "accelerating" => Some(Self::Accelerating),
            "somewhat_worse" => Some(Self::SomewhatWorse),
            "stable" => Some(Self::Stable),
            _ => None,
        }
    }

    pub const fn token(self) -> &'static str {
        match self {
            Self::Accelerating => "accelerating",
            Self::SomewhatWorse => "somewhat_worse",
            Self::Stable => "stable",
        }
    }

    /// An active shed means follicles are still alive.
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Accelerating | Self::SomewhatWorse)
    }
}

/// Self-identified situational bucket used for personalization and as a
/// classifier signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persona {
    Postpartum,
    MaleEarly,
    Stressed,
    FemaleMature,
    Other,
}

impl Persona {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "postpartum" => Some(Self::Postpartum),
            "male_early" => Some(Self::MaleEarly),
            "stressed" => Some(Self::Stressed),
            "female_mature" => Some(Self::FemaleMature),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub const fn token(self) -> &'static str {
        match self {
            Self::Postpartum => "postpartum",
            Self::MaleEarly => "male_early",
            Self::Stressed => "stressed",
            Self::FemaleMature => "female_mature",
            Self::Other => "other",
        }
    }
}

/// Willingness to pursue treatment if eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreatmentOpenness {
    Yes,
    Maybe,
    No,
}

impl TreatmentOpenness {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "yes" => Some(Self::Yes),
            "maybe" => Some(Self::Maybe),
            "no" => Some(Self::No),
            _ => None,
        }
    }

    pub const fn token(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::Maybe => "maybe",
            Self::No => "no",
        }
    }

    pub const fn is_interested(self) -> bool {
        matches!(self, Self::Yes | Self::Maybe)
    }
}

/// One raw answer lifted into its shape: an option token, a numeric slider
/// reading, or an explicit skip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerValue<'a> {
    Choice(&'a str),
    Scale(u32),
    Skipped,
}

/// Read-only typed view over an [`AnswerMap`].
///
/// Every accessor returns `None` for missing, skipped, or unrecognized values;
/// nothing here can fail. This keeps string comparisons out of the decision
/// rules and confines them to one translation layer.
#[derive(Debug, Clone, Copy)]
pub struct AnswerSheet<'a> {
    answers: &'a AnswerMap,
}

impl<'a> AnswerSheet<'a> {
    pub fn new(answers: &'a AnswerMap) -> Self {
        Self { answers }
    }

    pub fn raw(&self, step: StepIndex) -> Option<&'a str> {
        self.answers.get(&step).map(String::as_str)
    }

    pub fn value(&self, step: StepIndex) -> Option<AnswerValue<'a>> {
        let raw = self.raw(step)?;
        if raw == SKIPPED {
            return Some(AnswerValue::Skipped);
        }
        match raw.parse::<u32>() {
            Ok(scale) => Some(AnswerValue::Scale(scale)),
            Err(_) => Some(AnswerValue::Choice(raw)),
        }
    }

    pub fn is_skipped(&self, step: StepIndex) -> bool {
        matches!(self.value(step), Some(AnswerValue::Skipped))
    }

    pub fn area(&self) -> Option<HairLossArea> {
        self.raw(step::AREA).and_then(HairLossArea::from_token)
    }

    pub fn timeline(&self) -> Option<OnsetTimeline> {
        self.raw(step::TIMELINE).and_then(OnsetTimeline::from_token)
    }

    pub fn progression(&self) -> Option<Progression> {
        self.raw(step::PROGRESSION)
            .and_then(Progression::from_token)
    }

    pub fn persona(&self) -> Option<Persona> {
        self.raw(step::PERSONA).and_then(Persona::from_token)
    }

    pub fn openness(&self) -> Option<TreatmentOpenness> {
        self.raw(step::OPENNESS)
            .and_then(TreatmentOpenness::from_token)
    }
}
