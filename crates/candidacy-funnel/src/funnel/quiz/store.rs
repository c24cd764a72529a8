use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::answers::{AnswerMap, StepIndex};

/// Namespace segment used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "quiz-storage";

/// Identifies one visitor's quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Complete snapshot of a session. Persisting this and nothing else is what
/// makes resume-after-restart exact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub answers: AnswerMap,
    pub current_step: StepIndex,
}

impl SessionState {
    /// Empty answers, cursor on step 1.
    pub fn fresh() -> Self {
        Self {
            answers: AnswerMap::new(),
            current_step: 1,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::fresh()
    }
}

/// Storage abstraction so sessions can be exercised against files, memory,
/// or a deliberately failing backend in tests.
pub trait SessionStore: Send + Sync {
    fn save(&self, id: &SessionId, state: &SessionState) -> Result<(), SessionStoreError>;
    fn load(&self, id: &SessionId) -> Result<Option<SessionState>, SessionStoreError>;
    fn clear(&self, id: &SessionId) -> Result<(), SessionStoreError>;
}

/// Error enumeration for session storage failures.
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("session storage io failure: {0}")]
    Io(#[from] io::Error),
    #[error("session snapshot encoding failure: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("session storage unavailable: {0}")]
    Unavailable(String),
}

/// One JSON document per session at `<root>/<namespace>/<id>.json`.
///
/// The namespace keeps quiz snapshots apart from anything else sharing the
/// data directory. Ids are slugged before touching the filesystem so a
/// client-supplied id can never escape the namespace directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
    namespace: String,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_namespace(root, DEFAULT_NAMESPACE)
    }

    pub fn with_namespace(root: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            namespace: namespace.into(),
        }
    }

    fn session_path(&self, id: &SessionId) -> PathBuf {
        self.root
            .join(&self.namespace)
            .join(format!("{}.json", slugify_session_id(id.as_str())))
    }
}

impl SessionStore for JsonFileStore {
    fn save(&self, id: &SessionId, state: &SessionState) -> Result<(), SessionStoreError> {
        let path = self.session_path(id);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let encoded = serde_json::to_vec_pretty(state)?;
        fs::write(&path, encoded)?;
        Ok(())
    }

    fn load(&self, id: &SessionId) -> Result<Option<SessionState>, SessionStoreError> {
        let path = self.session_path(id);
        let raw = match fs::read(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let state = serde_json::from_slice(&raw)?;
        Ok(Some(state))
    }

    fn clear(&self, id: &SessionId) -> Result<(), SessionStoreError> {
        let path = self.session_path(id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

fn slugify_session_id(raw: &str) -> String {
    let mut slug = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect::<String>();
    while slug.contains("--") {
        slug = slug.replace("--", "-");
    }
    let trimmed = slug.trim_matches('-').to_string();
    if trimmed.is_empty() {
        "session".to_string()
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_keeps_safe_ids_intact() {
        assert_eq!(slugify_session_id("session-000042"), "session-000042");
        assert_eq!(slugify_session_id("visitor_A1"), "visitor_a1");
    }

    #[test]
    fn slug_defangs_path_traversal() {
        assert_eq!(slugify_session_id("../../etc/passwd"), "etc-passwd");
        assert_eq!(slugify_session_id("///"), "session");
    }

    #[test]
    fn fresh_state_starts_on_step_one() {
        let state = SessionState::fresh();
        assert!(state.answers.is_empty());
        assert_eq!(state.current_step, 1);
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut state = SessionState::fresh();
        state.answers.insert(1, "diffuse".to_string());
        state.answers.insert(3, "accelerating".to_string());
        state.current_step = 4;

        let encoded = serde_json::to_string(&state).unwrap();
        let decoded: SessionState = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, state);
    }
}
