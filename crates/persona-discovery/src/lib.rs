//! Scoring and classification engine for the Personality Discovery questionnaire,
//! plus the intake, persistence, and notification seams the HTTP service builds on.

pub mod config;
pub mod error;
pub mod survey;
pub mod telemetry;
