use metrics_exporter_prometheus::PrometheusHandle;
use persona_discovery::survey::{
    NotificationError, NotificationPublisher, Participant, ParticipantId, RepositoryError,
    ResponseId, ResponseSheet, ResultNotification, SurveyRepository, SurveyResponseRecord,
};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySurveyRepository {
    participants: Arc<Mutex<HashMap<ParticipantId, Participant>>>,
    responses: Arc<Mutex<HashMap<ResponseId, SurveyResponseRecord>>>,
}

impl SurveyRepository for InMemorySurveyRepository {
    fn insert_participant(&self, participant: Participant) -> Result<Participant, RepositoryError> {
        let mut guard = self.participants.lock().expect("repository mutex poisoned");
        let email_taken = guard
            .values()
            .any(|existing| existing.email == participant.email);
        if email_taken || guard.contains_key(&participant.participant_id) {
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
        // Lock order is participants then responses, shared with `clear`.
        let participants = self.participants.lock().expect("repository mutex poisoned");
        let mut responses = self.responses.lock().expect("repository mutex poisoned");
        if !participants.contains_key(&record.participant_id) {
            return Err(RepositoryError::NotFound);
        }
        if responses.contains_key(&record.response_id) {
            return Err(RepositoryError::Conflict);
        }
        responses.insert(record.response_id.clone(), record.clone());
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
        let mut participants = self.participants.lock().expect("repository mutex poisoned");
        let mut responses = self.responses.lock().expect("repository mutex poisoned");
        responses.clear();
        participants.clear();
        Ok(())
    }
}

/// Stands in for the mail relay: logs each result and keeps it for inspection.
#[derive(Default, Clone)]
pub(crate) struct LoggingNotificationPublisher {
    events: Arc<Mutex<Vec<ResultNotification>>>,
}

impl NotificationPublisher for LoggingNotificationPublisher {
    fn publish(&self, notification: ResultNotification) -> Result<(), NotificationError> {
        info!(
            sender = %notification.sender,
            recipient = %notification.recipient,
            response_id = %notification.response_id,
            classification = %notification.classification,
            "result notification queued"
        );
        let mut guard = self.events.lock().expect("notification mutex poisoned");
        guard.push(notification);
        Ok(())
    }
}

impl LoggingNotificationPublisher {
    pub(crate) fn events(&self) -> Vec<ResultNotification> {
        self.events
            .lock()
            .expect("notification mutex poisoned")
            .clone()
    }
}

/// Parses `C,B,A,...` into a sheet answering questions 1.. in order.
///
/// Empty positions are skipped so they surface as unanswered questions. Everything
/// else, padding included, reaches the engine untouched, matching the HTTP surface.
pub(crate) fn parse_answers(raw: &str) -> Result<ResponseSheet, String> {
    if raw.trim().is_empty() {
        return Err("expected a comma-separated list of answers such as C,B,A,...".to_string());
    }

    let answers: BTreeMap<u32, String> = raw
        .split(',')
        .enumerate()
        .filter(|(_, value)| !value.is_empty())
        .map(|(idx, value)| (idx as u32 + 1, value.to_string()))
        .collect();

    Ok(ResponseSheet::new(answers))
}
