//! Static result-page and case-study content served per tier.

use serde::Serialize;

use super::quiz::{Persona, ResultTier};

/// What the primary call to action does on a result page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CtaKind {
    Book,
    Download,
    Learn,
}

#[derive(Debug, Clone, Serialize)]
pub struct CallToAction {
    pub kind: CtaKind,
    pub label: &'static str,
    pub urgency_note: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeyPoint {
    pub title: &'static str,
    pub description: &'static str,
}

/// Presentation payload for one tier's result page.
#[derive(Debug, Clone, Serialize)]
pub struct ResultContent {
    pub tier: ResultTier,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub description: &'static str,
    pub key_points: Vec<KeyPoint>,
    pub cta: CallToAction,
}

pub fn content_for(tier: ResultTier) -> ResultContent {
    match tier {
        ResultTier::Ideal => ResultContent {
            tier,
            title: "You're Likely a Great Candidate",
            subtitle: "Good news: you appear to be an ideal candidate for regenerative hair restoration. Because you still have active follicles in the areas you're concerned about, treatment can likely help thicken and strengthen your hair.",
            description: "You're catching this at the right time. Early intervention means struggling follicles can be boosted before they're gone, using your own platelets rather than drugs or surgery.",
            key_points: vec![
                KeyPoint {
                    title: "Optimal Timing",
                    description: "You're in the ideal window for treatment; early intervention yields the best results.",
                },
                KeyPoint {
                    title: "Natural Healing",
                    description: "The therapy uses your own blood platelets to stimulate hair growth.",
                },
                KeyPoint {
                    title: "Proven Results",
                    description: "In studies, patients with early hair loss saw increased density within 3-6 months.",
                },
            ],
            cta: CallToAction {
                kind: CtaKind::Book,
                label: "Book Your Free Consultation",
                urgency_note: "Quiz takers get a free scalp analysis with their consult",
            },
        },
        ResultTier::Partial => ResultContent {
            tier,
            title: "You Might Be a Candidate; Let's Investigate Further",
            subtitle: "It looks like treatment could help you, but we'd need a closer look to be sure.",
            description: "Based on your responses, treatment may still stimulate growth, but results vary more when follicles have been inactive for longer periods. Underlying conditions or medications can also affect success.",
            key_points: vec![
                KeyPoint {
                    title: "Professional Evaluation Needed",
                    description: "A scalp examination can determine if you have enough active follicles.",
                },
                KeyPoint {
                    title: "Honest Assessment",
                    description: "If treatment isn't likely to help, we'll guide you to other options.",
                },
                KeyPoint {
                    title: "Customized Approach",
                    description: "Your plan will be tailored to your specific hair loss pattern and goals.",
                },
            ],
            cta: CallToAction {
                kind: CtaKind::Book,
                label: "Schedule a Free Hair & Scalp Analysis",
                urgency_note: "Free consultation, no obligation",
            },
        },
        ResultTier::Unfit => ResultContent {
            tier,
            title: "This May Not Be The Right Solution for You",
            subtitle: "Thank you for taking the quiz. Based on your answers we want to be upfront: this therapy isn't likely to give you the results you want.",
            description: "The treatment works by reviving weakened hair follicles, but it can't create new ones. Since the affected area appears to have no active follicles left, even aggressive therapy wouldn't yield significant regrowth. There are other options we recommend for your situation.",
            key_points: vec![
                KeyPoint {
                    title: "Hair Transplant Surgery",
                    description: "Modern transplants can produce natural results by moving healthy hair to bald areas.",
                },
                KeyPoint {
                    title: "Medical Therapy",
                    description: "Medications or low-level laser therapy might help retain and improve the hair you do have.",
                },
                KeyPoint {
                    title: "Cosmetic Solutions",
                    description: "Scalp micropigmentation or hair systems can restore the appearance of fullness.",
                },
            ],
            cta: CallToAction {
                kind: CtaKind::Download,
                label: "Download '5 Options If This Isn't Right For You'",
                urgency_note: "Free guide with honest recommendations",
            },
        },
    }
}

/// A persona-matched patient story shown beside the result.
#[derive(Debug, Clone, Serialize)]
pub struct CaseStudy {
    pub persona: &'static str,
    pub name: &'static str,
    pub age: u8,
    pub headline: &'static str,
    pub summary: &'static str,
    pub statistic_value: &'static str,
    pub statistic_label: &'static str,
}

/// Personas without a published story fall back to no case study rather than
/// a mismatched one.
pub fn case_study_for_persona(persona: Persona) -> Option<CaseStudy> {
    match persona {
        Persona::Postpartum => Some(CaseStudy {
            persona: persona.token(),
            name: "Sarah",
            age: 32,
            headline: "Post-Partum Mom, Diffuse Crown Recovery",
            summary: "Four months after baby #2, shedding peaked. Three sessions cut daily fall-out by 68% and filled the widening part by month four.",
            statistic_value: "-68%",
            statistic_label: "shedding reduction",
        }),
        Persona::MaleEarly => Some(CaseStudy {
            persona: persona.token(),
            name: "Mike",
            age: 35,
            headline: "Early Balding Male, Crown Density Improvement",
            summary: "Norwood 3 crown thinning. Four sessions increased mean hair count by 24 hairs per square centimeter at 16 weeks.",
            statistic_value: "+24",
            statistic_label: "hairs/cm²",
        }),
        Persona::Stressed => Some(CaseStudy {
            persona: persona.token(),
            name: "Jade",
            age: 28,
            headline: "Stressed Millennial, Diffuse Loss Recovery",
            summary: "High-stress job, diffuse loss. After lifestyle tweaks plus maintenance sessions, shaft diameter grew 15% by month three.",
            statistic_value: "+15%",
            statistic_label: "hair calibre increase",
        }),
        Persona::FemaleMature | Persona::Other => None,
    }
}
