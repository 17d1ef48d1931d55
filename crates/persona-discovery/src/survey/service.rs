use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{
    Participant, ParticipantId, ParticipantRegistration, ResponseId, ResponseSheet,
    SurveySubmission,
};
use super::engine::{validate_sheet, ClassificationEngine, ClassificationError, ClassificationResult};
use super::intake::{IntakeGuard, IntakeViolation};
use super::repository::{
    NotificationPublisher, ParticipantView, RepositoryError, ResultNotification,
    SurveyRepository, SurveyResponseRecord,
};

pub const DEFAULT_NOTIFICATION_SENDER: &str = "noreply@personalityassessment.com";

/// Service composing intake, classification, storage, and result notifications.
pub struct SurveyService<R, N> {
    guard: IntakeGuard,
    engine: Arc<ClassificationEngine>,
    repository: Arc<R>,
    notifications: Arc<N>,
    sender: String,
}

static PARTICIPANT_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static RESPONSE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_participant_id() -> ParticipantId {
    let id = PARTICIPANT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ParticipantId(format!("participant-{id:06}"))
}

fn next_response_id() -> ResponseId {
    let id = RESPONSE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ResponseId(format!("response-{id:06}"))
}

impl<R, N> SurveyService<R, N>
where
    R: SurveyRepository + 'static,
    N: NotificationPublisher + 'static,
{
    pub fn new(engine: Arc<ClassificationEngine>, repository: Arc<R>, notifications: Arc<N>) -> Self {
        Self {
            guard: IntakeGuard,
            engine,
            repository,
            notifications,
            sender: DEFAULT_NOTIFICATION_SENDER.to_string(),
        }
    }

    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = sender.into();
        self
    }

    pub fn engine(&self) -> &ClassificationEngine {
        &self.engine
    }

    /// Stateless classification; nothing is stored.
    pub fn classify(&self, sheet: &ResponseSheet) -> Result<ClassificationResult, SurveyServiceError> {
        Ok(self.engine.classify(sheet)?)
    }

    pub fn register(
        &self,
        registration: ParticipantRegistration,
    ) -> Result<Participant, SurveyServiceError> {
        let participant = self.guard.participant_from_registration(
            registration,
            next_participant_id(),
            Utc::now(),
        )?;

        let stored = self.repository.insert_participant(participant)?;
        info!(participant_id = %stored.participant_id, "participant registered");
        Ok(stored)
    }

    /// Classify a completed questionnaire, persist it, then notify the participant.
    pub fn submit(
        &self,
        submission: SurveySubmission,
    ) -> Result<SurveyResponseRecord, SurveyServiceError> {
        let participant = self
            .repository
            .fetch_participant(&submission.participant_id)?
            .ok_or_else(|| SurveyServiceError::ParticipantNotFound(submission.participant_id.clone()))?;

        let answers = validate_sheet(&submission.sheet(), self.engine.questions())?;
        let result = self.engine.classify_answers(&answers);

        let record = SurveyResponseRecord {
            response_id: next_response_id(),
            participant_id: participant.participant_id.clone(),
            answers: answers.to_map(),
            result,
            submitted_at: Utc::now(),
        };
        let stored = self.repository.insert_response(record)?;

        info!(
            response_id = %stored.response_id,
            participant_id = %stored.participant_id,
            classification = %stored.classification(),
            confidence_band = stored.confidence_band().label(),
            "survey response stored"
        );

        let notification = ResultNotification {
            sender: self.sender.clone(),
            recipient: participant.email.clone(),
            participant_name: participant.name.clone(),
            response_id: stored.response_id.clone(),
            classification: stored.classification(),
            confidence_band: stored.confidence_band(),
            profile: stored.result.profile,
        };
        if let Err(error) = self.notifications.publish(notification) {
            warn!(
                response_id = %stored.response_id,
                error = %error,
                "result notification failed"
            );
        }

        Ok(stored)
    }

    pub fn participant(
        &self,
        participant_id: &ParticipantId,
    ) -> Result<ParticipantView, SurveyServiceError> {
        let participant = self
            .repository
            .fetch_participant(participant_id)?
            .ok_or_else(|| SurveyServiceError::ParticipantNotFound(participant_id.clone()))?;

        let mut responses = self.repository.responses_for(participant_id)?;
        newest_first(&mut responses);

        Ok(ParticipantView {
            participant,
            responses,
        })
    }

    pub fn response(
        &self,
        response_id: &ResponseId,
    ) -> Result<SurveyResponseRecord, SurveyServiceError> {
        self.repository
            .fetch_response(response_id)?
            .ok_or_else(|| SurveyServiceError::ResponseNotFound(response_id.clone()))
    }

    pub fn responses(&self) -> Result<Vec<SurveyResponseRecord>, SurveyServiceError> {
        let mut responses = self.repository.list_responses()?;
        newest_first(&mut responses);
        Ok(responses)
    }

    /// Drops every participant and response.
    pub fn reset(&self) -> Result<(), SurveyServiceError> {
        self.repository.clear()?;
        warn!("survey data cleared");
        Ok(())
    }
}

fn newest_first(records: &mut [SurveyResponseRecord]) {
    records.sort_by(|left, right| {
        right
            .submitted_at
            .cmp(&left.submitted_at)
            .then_with(|| {
                right
                    .response_id
                    .sequence()
                    .cmp(&left.response_id.sequence())
            })
            .then_with(|| right.response_id.cmp(&left.response_id))
    });
}

/// Error raised by the survey service.
#[derive(Debug, thiserror::Error)]
pub enum SurveyServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Classification(#[from] ClassificationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("participant '{0}' not found")]
    ParticipantNotFound(ParticipantId),
    #[error("response '{0}' not found")]
    ResponseNotFound(ResponseId),
}
