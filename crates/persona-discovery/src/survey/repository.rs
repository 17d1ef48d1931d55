use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::catalog::Profile;
use super::domain::{ClassificationType, Label, Participant, ParticipantId, ResponseId};
use super::engine::{ClassificationResult, ConfidenceBand};

/// Stored questionnaire submission with its server-side classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurveyResponseRecord {
    pub response_id: ResponseId,
    pub participant_id: ParticipantId,
    pub answers: BTreeMap<u8, Label>,
    pub result: ClassificationResult,
    pub submitted_at: DateTime<Utc>,
}

impl SurveyResponseRecord {
    pub fn classification(&self) -> ClassificationType {
        self.result.classification
    }

    pub fn confidence_band(&self) -> ConfidenceBand {
        self.result.confidence_band
    }

    pub fn total_score(&self) -> i32 {
        self.result.tally.total_score
    }
}

/// Participant together with their submissions, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantView {
    pub participant: Participant,
    pub responses: Vec<SurveyResponseRecord>,
}

/// Storage abstraction so the service module can be exercised in isolation.
pub trait SurveyRepository: Send + Sync {
    /// Fails with [`RepositoryError::Conflict`] when the id or email is already registered.
    fn insert_participant(&self, participant: Participant) -> Result<Participant, RepositoryError>;
    fn fetch_participant(&self, id: &ParticipantId) -> Result<Option<Participant>, RepositoryError>;
    fn insert_response(
        &self,
        record: SurveyResponseRecord,
    ) -> Result<SurveyResponseRecord, RepositoryError>;
    fn fetch_response(&self, id: &ResponseId)
        -> Result<Option<SurveyResponseRecord>, RepositoryError>;
    fn responses_for(
        &self,
        participant_id: &ParticipantId,
    ) -> Result<Vec<SurveyResponseRecord>, RepositoryError>;
    fn list_responses(&self) -> Result<Vec<SurveyResponseRecord>, RepositoryError>;
    fn clear(&self) -> Result<(), RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook for result delivery (e-mail, queue, log sink).
pub trait NotificationPublisher: Send + Sync {
    fn publish(&self, notification: ResultNotification) -> Result<(), NotificationError>;
}

/// Structured result payload; rendering is left to the publisher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultNotification {
    pub sender: String,
    pub recipient: String,
    pub participant_name: String,
    pub response_id: ResponseId,
    pub classification: ClassificationType,
    pub confidence_band: ConfidenceBand,
    pub profile: Profile,
}

#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}
