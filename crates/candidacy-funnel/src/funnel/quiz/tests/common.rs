use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::funnel::quiz::answers::{AnswerMap, StepIndex};
use crate::funnel::quiz::store::{SessionId, SessionState, SessionStore, SessionStoreError};

pub(super) fn answers(pairs: &[(StepIndex, &str)]) -> AnswerMap {
    pairs
        .iter()
        .map(|(step, value)| (*step, value.to_string()))
        .collect()
}

pub(super) fn session_id(suffix: &str) -> SessionId {
    SessionId::new(format!("session-{suffix}"))
}

/// Answer set satisfying both the recent-onset and postpartum fit rules.
pub(super) fn strong_fit_answers() -> AnswerMap {
    answers(&[
        (1, "diffuse"),
        (2, "under_6_months"),
        (3, "accelerating"),
        (6, "postpartum"),
        (7, "yes"),
    ])
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    snapshots: Arc<Mutex<HashMap<SessionId, SessionState>>>,
}

impl MemoryStore {
    pub(super) fn snapshot(&self, id: &SessionId) -> Option<SessionState> {
        self.snapshots
            .lock()
            .expect("store mutex poisoned")
            .get(id)
            .cloned()
    }
}

impl SessionStore for MemoryStore {
    fn save(&self, id: &SessionId, state: &SessionState) -> Result<(), SessionStoreError> {
        self.snapshots
            .lock()
            .expect("store mutex poisoned")
            .insert(id.clone(), state.clone());
        Ok(())
    }

    fn load(&self, id: &SessionId) -> Result<Option<SessionState>, SessionStoreError> {
        Ok(self.snapshot(id))
    }

    fn clear(&self, id: &SessionId) -> Result<(), SessionStoreError> {
        self.snapshots
            .lock()
            .expect("store mutex poisoned")
            .remove(id);
        Ok(())
    }
}

/// Accepts nothing, like a filesystem that ran out of quota.
pub(super) struct FullDiskStore;

impl SessionStore for FullDiskStore {
    fn save(&self, _id: &SessionId, _state: &SessionState) -> Result<(), SessionStoreError> {
        Err(SessionStoreError::Unavailable("quota exceeded".to_string()))
    }

    fn load(&self, _id: &SessionId) -> Result<Option<SessionState>, SessionStoreError> {
        Ok(None)
    }

    fn clear(&self, _id: &SessionId) -> Result<(), SessionStoreError> {
        Err(SessionStoreError::Unavailable("quota exceeded".to_string()))
    }
}

/// Load always fails, like a corrupt snapshot on disk.
pub(super) struct CorruptStore;

impl SessionStore for CorruptStore {
    fn save(&self, _id: &SessionId, _state: &SessionState) -> Result<(), SessionStoreError> {
        Ok(())
    }

    fn load(&self, _id: &SessionId) -> Result<Option<SessionState>, SessionStoreError> {
        Err(SessionStoreError::Unavailable(
            "snapshot unreadable".to_string(),
        ))
    }

    fn clear(&self, _id: &SessionId) -> Result<(), SessionStoreError> {
        Ok(())
    }
}
