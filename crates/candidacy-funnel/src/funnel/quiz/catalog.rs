use serde::Serialize;

use super::answers::{StepIndex, SKIPPED};

/// How a question is presented and therefore what answers it admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    MultipleChoice,
    Slider,
    AvatarSelect,
    Text,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizOption {
    pub label: &'static str,
    pub value: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct SliderBounds {
    pub min: u32,
    pub max: u32,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizQuestion {
    pub step: StepIndex,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub kind: QuestionKind,
    pub options: Vec<QuizOption>,
    pub optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slider: Option<SliderBounds>,
}

/// The ordered question table the funnel walks through.
///
/// Sessions and the classifier only consume step numbers and value tokens;
/// the catalog is the single place that knows which tokens are legal where.
#[derive(Debug)]
pub struct QuizCatalog {
    questions: Vec<QuizQuestion>,
}

impl QuizCatalog {
    pub fn standard() -> Self {
        Self::from_questions(standard_questions())
    }

    /// Builds a catalog from a custom question table, for funnels that do not
    /// use the standard schema.
    pub fn from_questions(questions: Vec<QuizQuestion>) -> Self {
        Self { questions }
    }

    pub fn total_steps(&self) -> StepIndex {
        self.questions.len() as StepIndex
    }

    pub fn question(&self, step: StepIndex) -> Option<&QuizQuestion> {
        self.questions.iter().find(|question| question.step == step)
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    /// Whether `value` is an admissible answer for `step`. The skip sentinel
    /// is admissible only on optional questions; unknown steps admit nothing.
    pub fn is_known_value(&self, step: StepIndex, value: &str) -> bool {
        let Some(question) = self.question(step) else {
            return false;
        };
        if value == SKIPPED {
            return question.optional;
        }
        match question.kind {
            QuestionKind::MultipleChoice | QuestionKind::AvatarSelect => question
                .options
                .iter()
                .any(|option| option.value == value),
            QuestionKind::Slider => match (question.slider, value.parse::<u32>()) {
                (Some(bounds), Ok(reading)) => reading >= bounds.min && reading <= bounds.max,
                _ => false,
            },
            QuestionKind::Text => !value.trim().is_empty(),
        }
    }
}

fn standard_questions() -> Vec<QuizQuestion> {
    vec![
        QuizQuestion {
            step: 1,
            title: "Where are you noticing hair loss?",
            subtitle: "Use visual options to help identify your primary area of hair thinning",
            kind: QuestionKind::AvatarSelect,
            options: vec![
                QuizOption {
                    label: "Crown/Vertex Thinning",
                    value: "crown",
                    description: "Thinning at the crown is often genetic and responds well when treated early.",
                },
                QuizOption {
                    label: "Receding Hairline/Temples",
                    value: "hairline",
                    description: "Hairline recession is usually hormonal; follicles can be strengthened before they miniaturize completely.",
                },
                QuizOption {
                    label: "Diffuse Overall Thinning",
                    value: "diffuse",
                    description: "Diffuse shedding can be temporary, for example postpartum or stress related.",
                },
                QuizOption {
                    label: "Bald Patches",
                    value: "patches",
                    description: "Isolated bald spots may be due to scarring or autoimmune causes and respond poorly to regenerative treatment.",
                },
            ],
            optional: false,
            slider: None,
        },
        QuizQuestion {
            step: 2,
            title: "When did you first notice the thinning?",
            subtitle: "The sooner you address hair loss, the better your outcome",
            kind: QuestionKind::MultipleChoice,
            options: vec![
                QuizOption {
                    label: "Within the last 6 months",
                    value: "under_6_months",
                    description: "You're in the ideal window for intervention.",
                },
                QuizOption {
                    label: "6-12 months ago",
                    value: "6_to_12_months",
                    description: "Recent onset within a year suggests active follicles that can still respond.",
                },
                QuizOption {
                    label: "1-2 years ago",
                    value: "1_to_2_years",
                    description: "Still within a reasonable timeframe; many follicles may be salvageable.",
                },
                QuizOption {
                    label: "Over 2 years ago",
                    value: "over_2_years",
                    description: "Long-standing loss may mean some follicles have become dormant.",
                },
            ],
            optional: false,
            slider: None,
        },
        QuizQuestion {
            step: 3,
            title: "Has it been getting worse recently?",
            subtitle: "Understanding progression helps determine the urgency of treatment",
            kind: QuestionKind::MultipleChoice,
            options: vec![
                QuizOption {
                    label: "Yes, it's accelerating",
                    value: "accelerating",
                    description: "Active worsening means intervention can still have a big impact.",
                },
                QuizOption {
                    label: "Somewhat worse",
                    value: "somewhat_worse",
                    description: "Gradual progression indicates ongoing follicle stress.",
                },
                QuizOption {
                    label: "No, it's stable or slowing",
                    value: "stable",
                    description: "Stable loss shifts the focus to regrowing what was lost.",
                },
            ],
            optional: false,
            slider: None,
        },
        QuizQuestion {
            step: 4,
            title: "What have you tried already?",
            subtitle: "This helps us understand your treatment journey",
            kind: QuestionKind::MultipleChoice,
            options: vec![
                QuizOption {
                    label: "Nothing yet",
                    value: "nothing",
                    description: "No worries, there is still a full range of first-line options.",
                },
                QuizOption {
                    label: "Minoxidil/Rogaine",
                    value: "minoxidil",
                    description: "Many try topical solutions first.",
                },
                QuizOption {
                    label: "Biotin or hair vitamins",
                    value: "vitamins",
                    description: "Supplements can help but often aren't enough for genetic hair loss.",
                },
                QuizOption {
                    label: "Prescription medications",
                    value: "prescription",
                    description: "If medications haven't given the desired results there are drug-free alternatives.",
                },
                QuizOption {
                    label: "Special shampoos",
                    value: "shampoos",
                    description: "Topical products have limitations.",
                },
                QuizOption {
                    label: "Multiple treatments",
                    value: "multiple",
                    description: "You've tried various approaches already.",
                },
            ],
            optional: false,
            slider: None,
        },
        QuizQuestion {
            step: 5,
            title: "What's your main goal with hair restoration?",
            subtitle: "Your goals help us tailor our approach",
            kind: QuestionKind::MultipleChoice,
            options: vec![
                QuizOption {
                    label: "Stop any further hair loss",
                    value: "stop_loss",
                    description: "Strengthening existing follicles slows down shedding.",
                },
                QuizOption {
                    label: "Regrow thicker, fuller hair",
                    value: "regrow",
                    description: "Density and thickness typically build over three to six months.",
                },
                QuizOption {
                    label: "Improve my hairline or crown coverage",
                    value: "specific_area",
                    description: "Specific areas can be targeted by reviving miniaturized hairs.",
                },
                QuizOption {
                    label: "Avoid surgery or long-term medications",
                    value: "natural",
                    description: "A drug-free, non-surgical route using the body's own healing factors.",
                },
                QuizOption {
                    label: "Restore my confidence in my appearance",
                    value: "confidence",
                    description: "Improving your hair can significantly boost self-esteem.",
                },
            ],
            optional: false,
            slider: None,
        },
        QuizQuestion {
            step: 6,
            title: "Which description fits you best?",
            subtitle: "This helps us personalize your recommendations",
            kind: QuestionKind::AvatarSelect,
            options: vec![
                QuizOption {
                    label: "Postpartum Mom",
                    value: "postpartum",
                    description: "Hair shed after having a baby",
                },
                QuizOption {
                    label: "Man under 50 with early thinning",
                    value: "male_early",
                    description: "Noticing crown or hairline changes",
                },
                QuizOption {
                    label: "Stressed or high-pressure lifestyle",
                    value: "stressed",
                    description: "Recent stress-related hair changes",
                },
                QuizOption {
                    label: "Woman 40+ with thinning hair",
                    value: "female_mature",
                    description: "Hormonal or age-related changes",
                },
                QuizOption {
                    label: "None of these/Other",
                    value: "other",
                    description: "Different situation than above",
                },
            ],
            optional: false,
            slider: None,
        },
        QuizQuestion {
            step: 7,
            title: "Are you open to treatment if you're a candidate?",
            subtitle: "This helps us provide the most relevant information",
            kind: QuestionKind::MultipleChoice,
            options: vec![
                QuizOption {
                    label: "Yes, I'm interested",
                    value: "yes",
                    description: "We'll show you personalized recommendations and next steps.",
                },
                QuizOption {
                    label: "Maybe, I need to know more",
                    value: "maybe",
                    description: "We'll provide detailed information to help you decide.",
                },
                QuizOption {
                    label: "Not right now",
                    value: "no",
                    description: "We'll share alternative options and resources for your consideration.",
                },
            ],
            optional: false,
            slider: None,
        },
    ]
}
