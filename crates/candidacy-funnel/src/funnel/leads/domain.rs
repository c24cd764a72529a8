use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::funnel::quiz::{AnswerMap, ResultTier, SessionId};

/// Identifier wrapper for captured leads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeadId(pub String);

/// Raw contact form exactly as the visitor submitted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email_consent: bool,
    #[serde(default)]
    pub phone_consent: bool,
    #[serde(default)]
    pub privacy_acknowledged: bool,
}

/// Contact details that survived validation. The privacy acknowledgement is a
/// gate, not data, so it is not carried past the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub email: String,
    pub phone: String,
    pub email_consent: bool,
    pub phone_consent: bool,
}

/// Everything captured for one submitted funnel walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub lead_id: LeadId,
    pub session_id: SessionId,
    pub answers: AnswerMap,
    pub result_tier: ResultTier,
    pub contact: ContactDetails,
    pub submitted_at: DateTime<Utc>,
}

impl LeadRecord {
    pub fn summary_view(&self) -> LeadSummaryView {
        LeadSummaryView {
            lead_id: self.lead_id.clone(),
            session_id: self.session_id.clone(),
            result_tier: self.result_tier.label(),
            email: self.contact.email.clone(),
            submitted_at: self.submitted_at,
        }
    }
}

/// Sanitized representation of a lead for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct LeadSummaryView {
    pub lead_id: LeadId,
    pub session_id: SessionId,
    pub result_tier: &'static str,
    pub email: String,
    pub submitted_at: DateTime<Utc>,
}
