use serde::{Deserialize, Serialize};

use super::answers::{AnswerMap, AnswerSheet, HairLossArea, OnsetTimeline, Persona, Progression, TreatmentOpenness};

/// Three-way candidacy outcome for a quiz-taker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultTier {
    Ideal,
    Partial,
    Unfit,
}

impl ResultTier {
    pub const fn label(self) -> &'static str {
        match self {
            ResultTier::Ideal => "ideal",
            ResultTier::Partial => "partial",
            ResultTier::Unfit => "unfit",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "ideal" => Some(ResultTier::Ideal),
            "partial" => Some(ResultTier::Partial),
            "unfit" => Some(ResultTier::Unfit),
            _ => None,
        }
    }
}

/// The rule that produced a tier, for explainability in logs and previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleMatch {
    NonViableArea,
    StaleStableLoss,
    DeclinedTreatment,
    ActiveRecentOnset,
    PostpartumDiffuse,
    EarlyInterventionWindow,
    Fallthrough,
}

impl RuleMatch {
    pub const fn describe(self) -> &'static str {
        match self {
            RuleMatch::NonViableArea => "isolated bald patches indicate non-viable follicles",
            RuleMatch::StaleStableLoss => "loss older than two years with no progression",
            RuleMatch::DeclinedTreatment => "visitor declined treatment outright",
            RuleMatch::ActiveRecentOnset => "recent onset, active progression, open to treatment",
            RuleMatch::PostpartumDiffuse => "postpartum diffuse shedding",
            RuleMatch::EarlyInterventionWindow => {
                "one to two year onset still accelerating, committed visitor"
            }
            RuleMatch::Fallthrough => "mixed or insufficient signal",
        }
    }
}

/// A tier together with the rule that selected it. The trace is derived on
/// demand and never persisted with session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub tier: ResultTier,
    pub rule: RuleMatch,
}

/// Maps an answer set to a candidacy tier.
///
/// Total over arbitrary input: empty maps, partial maps, and unrecognized
/// values all produce a tier. An unreadable signal simply fails to match any
/// rule, so malformed input degrades toward [`ResultTier::Partial`].
pub fn classify(answers: &AnswerMap) -> ResultTier {
    classify_with_trace(answers).tier
}

/// Same decision tree as [`classify`], reporting which rule fired.
///
/// First matching rule wins. Exclusions run before fit rules so a hard
/// contraindication can never be outvoted by otherwise positive signals.
pub fn classify_with_trace(answers: &AnswerMap) -> Classification {
    let sheet = AnswerSheet::new(answers);

    if sheet.area() == Some(HairLossArea::Patches) {
        return Classification {
            tier: ResultTier::Unfit,
            rule: RuleMatch::NonViableArea,
        };
    }

    if sheet.timeline() == Some(OnsetTimeline::OverTwoYears)
        && sheet.progression() == Some(Progression::Stable)
    {
        return Classification {
            tier: ResultTier::Unfit,
            rule: RuleMatch::StaleStableLoss,
        };
    }

    if sheet.openness() == Some(TreatmentOpenness::No) {
        return Classification {
            tier: ResultTier::Unfit,
            rule: RuleMatch::DeclinedTreatment,
        };
    }

    if sheet.timeline().map(OnsetTimeline::is_recent).unwrap_or(false)
        && sheet.progression().map(Progression::is_active).unwrap_or(false)
        && sheet
            .openness()
            .map(TreatmentOpenness::is_interested)
            .unwrap_or(false)
    {
        return Classification {
            tier: ResultTier::Ideal,
            rule: RuleMatch::ActiveRecentOnset,
        };
    }

    if sheet.persona() == Some(Persona::Postpartum) && sheet.area() == Some(HairLossArea::Diffuse) {
        return Classification {
            tier: ResultTier::Ideal,
            rule: RuleMatch::PostpartumDiffuse,
        };
    }

    if sheet.timeline() == Some(OnsetTimeline::OneToTwoYears)
        && sheet.progression() == Some(Progression::Accelerating)
        && sheet.openness() == Some(TreatmentOpenness::Yes)
    {
        return Classification {
            tier: ResultTier::Ideal,
            rule: RuleMatch::EarlyInterventionWindow,
        };
    }

    Classification {
        tier: ResultTier::Partial,
        rule: RuleMatch::Fallthrough,
    }
}
