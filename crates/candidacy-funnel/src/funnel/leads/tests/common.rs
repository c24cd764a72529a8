use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::funnel::leads::domain::{ContactForm, LeadId, LeadRecord};
use crate::funnel::leads::repository::{LeadRepository, RepositoryError};
use crate::funnel::leads::router::{funnel_router, FunnelState};
use crate::funnel::quiz::{AnswerMap, SessionId, SessionState, SessionStore, SessionStoreError, StepIndex};

pub(super) fn answers(pairs: &[(StepIndex, &str)]) -> AnswerMap {
    pairs
        .iter()
        .map(|(step, value)| (*step, value.to_string()))
        .collect()
}

pub(super) fn ideal_answers() -> AnswerMap {
    answers(&[
        (1, "diffuse"),
        (2, "under_6_months"),
        (3, "accelerating"),
        (6, "postpartum"),
        (7, "yes"),
    ])
}

pub(super) fn valid_form() -> ContactForm {
    ContactForm {
        email: "visitor@example.com".to_string(),
        phone: "+1 (515) 555-0142".to_string(),
        email_consent: true,
        phone_consent: false,
        privacy_acknowledged: true,
    }
}

pub(super) fn empty_form() -> ContactForm {
    ContactForm {
        email: String::new(),
        phone: String::new(),
        email_consent: false,
        phone_consent: false,
        privacy_acknowledged: false,
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryLeads {
    records: Arc<Mutex<Vec<LeadRecord>>>,
}

impl MemoryLeads {
    pub(super) fn stored(&self) -> Vec<LeadRecord> {
        self.records.lock().expect("lead mutex poisoned").clone()
    }
}

impl LeadRepository for MemoryLeads {
    fn insert(&self, record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("lead mutex poisoned");
        if guard.iter().any(|existing| existing.lead_id == record.lead_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        let guard = self.records.lock().expect("lead mutex poisoned");
        Ok(guard.iter().find(|record| &record.lead_id == id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<LeadRecord>, RepositoryError> {
        let guard = self.records.lock().expect("lead mutex poisoned");
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}

pub(super) struct UnavailableLeads;

impl LeadRepository for UnavailableLeads {
    fn insert(&self, _record: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<LeadRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemorySessions {
    snapshots: Arc<Mutex<HashMap<SessionId, SessionState>>>,
}

impl SessionStore for MemorySessions {
    fn save(&self, id: &SessionId, state: &SessionState) -> Result<(), SessionStoreError> {
        self.snapshots
            .lock()
            .expect("session mutex poisoned")
            .insert(id.clone(), state.clone());
        Ok(())
    }

    fn load(&self, id: &SessionId) -> Result<Option<SessionState>, SessionStoreError> {
        Ok(self
            .snapshots
            .lock()
            .expect("session mutex poisoned")
            .get(id)
            .cloned())
    }

    fn clear(&self, id: &SessionId) -> Result<(), SessionStoreError> {
        self.snapshots
            .lock()
            .expect("session mutex poisoned")
            .remove(id);
        Ok(())
    }
}

pub(super) fn funnel_router_with_memory() -> (axum::Router, Arc<MemoryLeads>) {
    let sessions = Arc::new(MemorySessions::default());
    let leads = Arc::new(MemoryLeads::default());
    let state = Arc::new(FunnelState::new(sessions, leads.clone()));
    (funnel_router(state), leads)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf8 payload")
}

pub(super) fn json_request(
    method: &str,
    uri: &str,
    body: &Value,
) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(body).expect("encode body"),
        ))
        .expect("build request")
}

pub(super) fn get_request(uri: &str) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::builder()
        .method("GET")
        .uri(uri)
        .body(axum::body::Body::empty())
        .expect("build request")
}
