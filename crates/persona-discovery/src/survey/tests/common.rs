use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::survey::domain::{
    Label, Participant, ParticipantId, ParticipantRegistration, Profession, ResponseId,
    SurveySubmission,
};
use crate::survey::engine::ClassificationEngine;
use crate::survey::repository::{
    NotificationError, NotificationPublisher, RepositoryError, ResultNotification,
    SurveyRepository, SurveyResponseRecord,
};
use crate::survey::{survey_router, SurveyService};

pub(super) fn engine() -> Arc<ClassificationEngine> {
    Arc::new(ClassificationEngine::standard().expect("standard catalogs are valid"))
}

pub(super) fn registration(email: &str) -> ParticipantRegistration {
    ParticipantRegistration {
        name: " Maya Fernandes ".to_string(),
        age: 27,
        profession: Profession::Working,
        email: email.to_string(),
    }
}

pub(super) fn answers(labels: [Label; 10]) -> BTreeMap<u32, String> {
    labels
        .iter()
        .enumerate()
        .map(|(idx, label)| (idx as u32 + 1, label.as_str().to_string()))
        .collect()
}

pub(super) fn submission(participant_id: &ParticipantId, labels: [Label; 10]) -> SurveySubmission {
    SurveySubmission {
        participant_id: participant_id.clone(),
        answers: answers(labels),
    }
}

pub(super) fn hybrid_labels() -> [Label; 10] {
    use Label::*;
    [B, B, B, B, C, C, C, C, A, A]
}

pub(super) fn build_service() -> (
    SurveyService<MemoryRepository, MemoryNotifications>,
    Arc<MemoryRepository>,
    Arc<MemoryNotifications>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let notifications = Arc::new(MemoryNotifications::default());
    let service = SurveyService::new(engine(), repository.clone(), notifications.clone());
    (service, repository, notifications)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    participants: Arc<Mutex<HashMap<ParticipantId, Participant>>>,
    responses: Arc<Mutex<HashMap<ResponseId, SurveyResponseRecord>>>,
}

impl MemoryRepository {
    pub(super) fn response_count(&self) -> usize {
        self.responses.lock().expect("repository mutex poisoned").len()
    }
}

impl SurveyRepository for MemoryRepository {
    fn insert_participant(&self, participant: Participant) -> Result<Participant, RepositoryError> {
        let mut guard = self.participants.lock().expect("repository mutex poisoned");
        if guard.contains_key(&participant.participant_id)
            || guard.values().any(|existing| existing.email == participant.email)
        {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(participant.participant_id.clone(), participant.clone());
        Ok(participant)
    }

    fn fetch_participant(&self, id: &ParticipantId) -> Result<Option<Participant>, RepositoryError> {
        let guard = self.participants.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn insert_response(
        &self,
        record: SurveyResponseRecord,
    ) -> Result<SurveyResponseRecord, RepositoryError> {
        let mut guard = self.responses.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.response_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.response_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch_response(
        &self,
        id: &ResponseId,
    ) -> Result<Option<SurveyResponseRecord>, RepositoryError> {
        let guard = self.responses.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn responses_for(
        &self,
        participant_id: &ParticipantId,
    ) -> Result<Vec<SurveyResponseRecord>, RepositoryError> {
        let guard = self.responses.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| &record.participant_id == participant_id)
            .cloned()
            .collect())
    }

    fn list_responses(&self) -> Result<Vec<SurveyResponseRecord>, RepositoryError> {
        let guard = self.responses.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn clear(&self) -> Result<(), RepositoryError> {
        self.participants
            .lock()
            .expect("repository mutex poisoned")
            .clear();
        self.responses
            .lock()
            .expect("repository mutex poisoned")
            .clear();
        Ok(())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryNotifications {
    events: Arc<Mutex<Vec<ResultNotification>>>,
}

impl MemoryNotifications {
    pub(super) fn events(&self) -> Vec<ResultNotification> {
        self.events
            .lock()
            .expect("notification mutex poisoned")
            .clone()
    }
}

impl NotificationPublisher for MemoryNotifications {
    fn publish(&self, notification: ResultNotification) -> Result<(), NotificationError> {
        self.events
            .lock()
            .expect("notification mutex poisoned")
            .push(notification);
        Ok(())
    }
}

pub(super) struct OfflineNotifications;

impl NotificationPublisher for OfflineNotifications {
    fn publish(&self, _notification: ResultNotification) -> Result<(), NotificationError> {
        Err(NotificationError::Transport("smtp relay offline".to_string()))
    }
}

pub(super) struct UnavailableRepository;

impl SurveyRepository for UnavailableRepository {
    fn insert_participant(&self, _participant: Participant) -> Result<Participant, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_participant(&self, _id: &ParticipantId) -> Result<Option<Participant>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_response(
        &self,
        _record: SurveyResponseRecord,
    ) -> Result<SurveyResponseRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_response(
        &self,
        _id: &ResponseId,
    ) -> Result<Option<SurveyResponseRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn responses_for(
        &self,
        _participant_id: &ParticipantId,
    ) -> Result<Vec<SurveyResponseRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_responses(&self) -> Result<Vec<SurveyResponseRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn clear(&self) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn assert_status(response: &Response, expected: StatusCode) {
    assert_eq!(response.status(), expected);
}

pub(super) async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body")
        .to_vec()
}

pub(super) async fn read_json_body(response: Response) -> Value {
    serde_json::from_slice(&read_body(response).await).expect("json payload")
}

pub(super) fn survey_router_with_service(
    service: SurveyService<MemoryRepository, MemoryNotifications>,
) -> axum::Router {
    survey_router(Arc::new(service))
}
