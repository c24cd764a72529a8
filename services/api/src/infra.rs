use candidacy_funnel::funnel::leads::{LeadId, LeadRecord, LeadRepository, RepositoryError};
use candidacy_funnel::funnel::quiz::{SessionId, SessionState, SessionStore, SessionStoreError};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local session snapshots for demos and single-node deployments
/// that run without a data directory.
#[derive(Default, Clone)]
pub(crate) struct InMemorySessionStore {
    snapshots: Arc<Mutex<HashMap<SessionId, SessionState>>>,
}

impl SessionStore for InMemorySessionStore {
    fn save(&self, id: &SessionId, state: &SessionState) -> Result<(), SessionStoreError> {
        let mut guard = self.snapshots.lock().expect("session mutex poisoned");
        guard.insert(id.clone(), state.clone());
        Ok(())
    }

    fn load(&self, id: &SessionId) -> Result<Option<SessionState>, SessionStoreError> {
        let guard = self.snapshots.lock().expect("session mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn clear(&self, id: &SessionId) -> Result<(), SessionStoreError> {
        let mut guard = self.snapshots.lock().expect("session mutex poisoned");
        guard.remove(id);
        Ok(())
    }
}

/// Captured leads in insertion order, so `recent` can return newest first.
#[derive(Default, Clone)]
pub(crate) struct InMemoryLeadRepository {
    records: Arc<Mutex<Vec<LeadRecord>>>,
}

impl LeadRepository for InMemoryLeadRepository {
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
