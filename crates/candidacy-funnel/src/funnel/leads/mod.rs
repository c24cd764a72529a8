//! Contact capture at the end of the funnel: validation, classification,
//! lead storage, and the HTTP surface.

pub mod contact;
pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use contact::{validate_contact, ContactViolation, ContactViolations};
pub use domain::{ContactDetails, ContactForm, LeadId, LeadRecord, LeadSummaryView};
pub use repository::{LeadRepository, RepositoryError};
pub use router::{funnel_router, FunnelState};
pub use service::{LeadCaptureService, LeadServiceError, SubmissionOutcome};
