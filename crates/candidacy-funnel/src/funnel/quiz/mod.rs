//! Quiz session state, question catalog, and the candidacy classifier.
//!
//! The answer map stays stringly typed end to end so heterogeneous question
//! kinds share one storage shape; [`answers::AnswerSheet`] is the single
//! translation layer that lifts raw tokens into typed signals for the
//! classifier.

pub mod answers;
pub mod catalog;
pub mod classifier;
pub mod session;
pub mod store;

#[cfg(test)]
mod tests;

pub use answers::{
    AnswerMap, AnswerSheet, AnswerValue, HairLossArea, OnsetTimeline, Persona, Progression,
    StepIndex, TreatmentOpenness, SKIPPED,
};
pub use catalog::{QuestionKind, QuizCatalog, QuizOption, QuizQuestion, SliderBounds};
pub use classifier::{classify, classify_with_trace, Classification, ResultTier, RuleMatch};
pub use session::{QuizSession, SaveState, SessionError};
pub use store::{JsonFileStore, SessionId, SessionState, SessionStore, SessionStoreError};
