//! Core library for the PRP candidacy quiz funnel.
//!
//! The funnel walks a visitor through a fixed sequence of questions, keeps the
//! in-progress session durable across page reloads, classifies the completed
//! answer set into a candidacy tier, and captures contact details as a lead
//! record. HTTP routing lives here too so the service binary stays a thin
//! bootstrap layer.

pub mod config;
pub mod error;
pub mod funnel;
pub mod telemetry;
