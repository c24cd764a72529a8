use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::warn;

use super::contact::{validate_contact, ContactViolations};
use super::domain::{ContactForm, LeadId, LeadRecord, LeadSummaryView};
use super::repository::{LeadRepository, RepositoryError};
use crate::funnel::quiz::{classify, AnswerMap, ResultTier, SessionId};

static LEAD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_lead_id() -> LeadId {
    let id = LEAD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    LeadId(format!("lead-{id:06}"))
}

/// What the visitor gets back from a submission. `stored` is advisory: the
/// tier is valid even when the lead write failed.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionOutcome {
    pub lead_id: LeadId,
    pub result_tier: ResultTier,
    pub stored: bool,
}

/// Service composing contact validation, classification, and lead storage.
pub struct LeadCaptureService<R> {
    repository: Arc<R>,
}

impl<R> LeadCaptureService<R>
where
    R: LeadRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Captures a lead from a finished quiz walk.
    ///
    /// Contact validation is the only failure path. The answers are
    /// classified exactly once, and the resulting tier stands regardless of
    /// whether the record reaches storage; an insert failure downgrades to a
    /// warning so the visitor still lands on their result page.
    pub fn submit(
        &self,
        session_id: &SessionId,
        answers: &AnswerMap,
        form: &ContactForm,
    ) -> Result<SubmissionOutcome, ContactViolations> {
        let contact = validate_contact(form)?;
        let result_tier = classify(answers);
        let lead_id = next_lead_id();

        let record = LeadRecord {
            lead_id: lead_id.clone(),
            session_id: session_id.clone(),
            answers: answers.clone(),
            result_tier,
            contact,
            submitted_at: Utc::now(),
        };

        let stored = match self.repository.insert(record) {
            Ok(_) => true,
            Err(err) => {
                warn!(lead = %lead_id.0, session = %session_id, error = %err, "lead not stored");
                false
            }
        };

        Ok(SubmissionOutcome {
            lead_id,
            result_tier,
            stored,
        })
    }

    /// Fetch one captured lead.
    pub fn lead(&self, id: &LeadId) -> Result<LeadRecord, LeadServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Most recently captured leads, newest first.
    pub fn recent_leads(&self, limit: usize) -> Result<Vec<LeadSummaryView>, LeadServiceError> {
        let records = self.repository.recent(limit)?;
        Ok(records.iter().map(LeadRecord::summary_view).collect())
    }

    /// All captured leads as CSV, one row per lead, answers flattened to
    /// `step=value` pairs joined with `;`.
    pub fn export_csv(&self) -> Result<String, LeadServiceError> {
        let records = self.repository.recent(usize::MAX)?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record([
                "lead_id",
                "session_id",
                "result_tier",
                "email",
                "phone",
                "email_consent",
                "phone_consent",
                "submitted_at",
                "answers",
            ])
            .map_err(|err| LeadServiceError::Export(err.to_string()))?;

        for record in &records {
            let answers = record
                .answers
                .iter()
                .map(|(step, value)| format!("{step}={value}"))
                .collect::<Vec<_>>()
                .join(";");
            writer
                .write_record([
                    record.lead_id.0.as_str(),
                    record.session_id.as_str(),
                    record.result_tier.label(),
                    record.contact.email.as_str(),
                    record.contact.phone.as_str(),
                    if record.contact.email_consent { "true" } else { "false" },
                    if record.contact.phone_consent { "true" } else { "false" },
                    record.submitted_at.to_rfc3339().as_str(),
                    answers.as_str(),
                ])
                .map_err(|err| LeadServiceError::Export(err.to_string()))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|err| LeadServiceError::Export(err.to_string()))?;
        String::from_utf8(bytes).map_err(|err| LeadServiceError::Export(err.to_string()))
    }
}

/// Error raised by the lead surfaces that do have hard failure modes.
#[derive(Debug, thiserror::Error)]
pub enum LeadServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("lead export failed: {0}")]
    Export(String),
}
