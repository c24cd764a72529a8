use std::sync::Arc;

use tracing::warn;

use super::answers::{AnswerMap, StepIndex};
use super::classifier::{classify, classify_with_trace, Classification, ResultTier};
use super::store::{SessionId, SessionState, SessionStore, SessionStoreError};

/// Whether the last mutation reached durable storage.
///
/// Mutations always apply in memory first; a failed write downgrades the
/// result to `Volatile` instead of failing the mutation, so the visitor keeps
/// moving through the quiz while the caller decides what to do with the
/// warning.
#[derive(Debug)]
pub enum SaveState {
    Durable,
    Volatile(SessionStoreError),
}

impl SaveState {
    pub fn is_durable(&self) -> bool {
        matches!(self, SaveState::Durable)
    }
}

/// Error enumeration for session mutations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("step {0} is outside the quiz; steps are numbered from 1")]
    InvalidStep(StepIndex),
}

/// One visitor's walk through the quiz.
///
/// Explicitly constructed around a store handle; never ambient state. Every
/// mutation snapshots the full state to the store before returning.
#[derive(Debug)]
pub struct QuizSession<S: SessionStore> {
    id: SessionId,
    state: SessionState,
    store: Arc<S>,
}

impl<S: SessionStore> QuizSession<S> {
    /// Opens a brand-new session: empty answers, cursor on step 1.
    pub fn start(store: Arc<S>, id: SessionId) -> Self {
        Self {
            id,
            state: SessionState::fresh(),
            store,
        }
    }

    /// Restores a persisted snapshot, or starts fresh when none exists.
    ///
    /// An unreadable snapshot degrades to a fresh session with a warning
    /// rather than an error; a visitor must never be locked out of the quiz
    /// by a corrupt file.
    pub fn resume_or_start(store: Arc<S>, id: SessionId) -> Self {
        let state = match store.load(&id) {
            Ok(Some(state)) => state,
            Ok(None) => SessionState::fresh(),
            Err(err) => {
                warn!(session = %id, error = %err, "session snapshot unreadable, starting fresh");
                SessionState::fresh()
            }
        };
        Self { id, state, store }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.state.answers
    }

    pub fn current_step(&self) -> StepIndex {
        self.state.current_step
    }

    /// Records an answer for `step`, overwriting any previous value.
    pub fn set_answer(
        &mut self,
        step: StepIndex,
        value: impl Into<String>,
    ) -> Result<SaveState, SessionError> {
        if step == 0 {
            return Err(SessionError::InvalidStep(step));
        }
        self.state.answers.insert(step, value.into());
        Ok(self.persist())
    }

    /// Moves the cursor. Any positive step is accepted, even past the end of
    /// the catalog; navigation bounds are the caller's concern.
    pub fn set_current_step(&mut self, step: StepIndex) -> Result<SaveState, SessionError> {
        if step == 0 {
            return Err(SessionError::InvalidStep(step));
        }
        self.state.current_step = step;
        Ok(self.persist())
    }

    /// Drops all answers, returns the cursor to step 1, and removes the
    /// persisted snapshot.
    pub fn reset(&mut self) -> SaveState {
        self.state = SessionState::fresh();
        match self.store.clear(&self.id) {
            Ok(()) => SaveState::Durable,
            Err(err) => {
                warn!(session = %self.id, error = %err, "session snapshot not cleared");
                SaveState::Volatile(err)
            }
        }
    }

    /// Classifies the current answers snapshot. Callable at any point in the
    /// quiz, not only at completion.
    pub fn classify(&self) -> ResultTier {
        classify(&self.state.answers)
    }

    /// Classification with the matched rule, for previews and logs.
    pub fn classification(&self) -> Classification {
        classify_with_trace(&self.state.answers)
    }

    fn persist(&self) -> SaveState {
        match self.store.save(&self.id, &self.state) {
            Ok(()) => SaveState::Durable,
            Err(err) => {
                warn!(session = %self.id, error = %err, "session snapshot not persisted");
                SaveState::Volatile(err)
            }
        }
    }
}
