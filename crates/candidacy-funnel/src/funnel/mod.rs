//! The lead-generation funnel: quiz, classification, contact capture, and
//! result-page content.

pub mod leads;
pub mod quiz;
pub mod results;
