//! Questionnaire scoring and personality classification, plus the intake and result
//! plumbing around it.
//!
//! The engine is pure: a [`ResponseSheet`] goes in, a [`ClassificationResult`] comes out.
//! [`SurveyService`] layers participant intake, storage, and notifications on top, and
//! [`survey_router`] exposes it over HTTP.

pub mod batch;
pub mod catalog;
pub mod domain;
pub mod engine;
pub mod export;
pub mod intake;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use batch::{BatchClassifier, BatchImportError, BatchOutcome};
pub use catalog::{CatalogError, Profile, ProfileCatalog, QuestionCatalog};
pub use domain::{
    AnswerSet, ClassificationType, Label, Participant, ParticipantId, ParticipantRegistration,
    Profession, ResponseId, ResponseSheet, SurveySubmission, QUESTION_COUNT,
};
pub use engine::{
    ClassificationEngine, ClassificationError, ClassificationResult, ConfidenceBand, Tally,
};
pub use export::write_responses_csv;
pub use intake::{IntakeGuard, IntakeViolation};
pub use repository::{
    NotificationError, NotificationPublisher, ParticipantView, RepositoryError,
    ResultNotification, SurveyRepository, SurveyResponseRecord,
};
pub use router::{admin_router, survey_router};
pub use service::{SurveyService, SurveyServiceError, DEFAULT_NOTIFICATION_SENDER};
