//! Registration, submission, and export driven through the public HTTP router.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use persona_discovery::survey::{
        ClassificationEngine, NotificationError, NotificationPublisher, Participant,
        ParticipantId, RepositoryError, ResponseId, ResultNotification, SurveyRepository,
        SurveyResponseRecord, SurveyService,
    };

    #[derive(Default)]
    pub struct MemoryRepository {
        participants: Mutex<HashMap<ParticipantId, Participant>>,
        responses: Mutex<HashMap<ResponseId, SurveyResponseRecord>>,
    }

    impl SurveyRepository for MemoryRepository {
        fn insert_participant(
            &self,
            participant: Participant,
        ) -> Result<Participant, RepositoryError> {
            let mut guard = self.participants.lock().expect("mutex poisoned");
            if guard.values().any(|existing| existing.email == participant.email) {
                return Err(RepositoryError::Conflict);
            }
            guard.insert(participant.participant_id.clone(), participant.clone());
            Ok(participant)
        }

        fn fetch_participant(
            &self,
            id: &ParticipantId,
        ) -> Result<Option<Participant>, RepositoryError> {
            Ok(self.participants.lock().expect("mutex poisoned").get(id).cloned())
        }

        fn insert_response(
            &self,
            record: SurveyResponseRecord,
        ) -> Result<SurveyResponseRecord, RepositoryError> {
            self.responses
                .lock()
                .expect("mutex poisoned")
                .insert(record.response_id.clone(), record.clone());
            Ok(record)
        }

        fn fetch_response(
            &self,
            id: &ResponseId,
        ) -> Result<Option<SurveyResponseRecord>, RepositoryError> {
            Ok(self.responses.lock().expect("mutex poisoned").get(id).cloned())
        }

        fn responses_for(
            &self,
            participant_id: &ParticipantId,
        ) -> Result<Vec<SurveyResponseRecord>, RepositoryError> {
            Ok(self
                .responses
                .lock()
                .expect("mutex poisoned")
                .values()
                .filter(|record| &record.participant_id == participant_id)
                .cloned()
                .collect())
        }

        fn list_responses(&self) -> Result<Vec<SurveyResponseRecord>, RepositoryError> {
            Ok(self
                .responses
                .lock()
                .expect("mutex poisoned")
                .values()
                .cloned()
                .collect())
        }

        fn clear(&self) -> Result<(), RepositoryError> {
            self.participants.lock().expect("mutex poisoned").clear();
            self.responses.lock().expect("mutex poisoned").clear();
            Ok(())
        }
    }

    #[derive(Default)]
    pub struct MemoryNotifications {
        pub events: Mutex<Vec<ResultNotification>>,
    }

    impl NotificationPublisher for MemoryNotifications {
        fn publish(&self, notification: ResultNotification) -> Result<(), NotificationError> {
            self.events.lock().expect("mutex poisoned").push(notification);
            Ok(())
        }
    }

    pub fn service() -> (
        Arc<SurveyService<MemoryRepository, MemoryNotifications>>,
        Arc<MemoryNotifications>,
    ) {
        let engine = Arc::new(ClassificationEngine::standard().expect("standard catalogs"));
        let notifications = Arc::new(MemoryNotifications::default());
        let service = SurveyService::new(
            engine,
            Arc::new(MemoryRepository::default()),
            notifications.clone(),
        );
        (Arc::new(service), notifications)
    }
}

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use persona_discovery::survey::survey_router;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json payload")
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request builds")
}

#[tokio::test]
async fn participant_completes_questionnaire_and_receives_result() {
    let (service, notifications) = common::service();
    let router = survey_router(service);

    let registered = router
        .clone()
        .oneshot(post(
            "/api/v1/survey/participants",
            json!({
                "name": "Arjun Mehta",
                "age": 34,
                "profession": "working",
                "email": "Arjun.Mehta@Example.com",
            }),
        ))
        .await
        .expect("route executes");
    assert_eq!(registered.status(), StatusCode::CREATED);
    let participant = json_body(registered).await;
    let participant_id = participant["participant_id"]
        .as_str()
        .expect("participant id")
        .to_string();
    assert_eq!(participant["email"], "arjun.mehta@example.com");

    let answers: serde_json::Map<String, Value> = (1..=10)
        .map(|id| (id.to_string(), json!(if id <= 6 { "C" } else { "A" })))
        .collect();
    let submitted = router
        .clone()
        .oneshot(post(
            "/api/v1/survey/responses",
            json!({ "participant_id": participant_id, "answers": answers }),
        ))
        .await
        .expect("route executes");
    assert_eq!(submitted.status(), StatusCode::CREATED);
    let record = json_body(submitted).await;
    assert_eq!(record["result"]["classification"], "empathic_anchor");
    assert_eq!(record["result"]["confidence_band"], "moderate");
    assert_eq!(record["result"]["tally"]["total_score"], 5);

    let events = notifications.events.lock().expect("mutex poisoned").clone();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].recipient, "arjun.mehta@example.com");

    let listed = router
        .clone()
        .oneshot(get("/api/v1/survey/responses"))
        .await
        .expect("route executes");
    assert_eq!(listed.status(), StatusCode::OK);
    assert_eq!(
        json_body(listed).await["responses"].as_array().map(Vec::len),
        Some(1)
    );

    let export = router
        .oneshot(get("/api/v1/survey/exports/responses.csv"))
        .await
        .expect("route executes");
    assert_eq!(export.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(export.into_body(), usize::MAX)
        .await
        .expect("read body");
    let csv = String::from_utf8(bytes.to_vec()).expect("utf8");
    assert!(csv.contains(&participant_id));
    assert!(csv.contains("Empathic Anchor,Moderate,5,4,0,6,0"));
}

#[tokio::test]
async fn invalid_registration_is_unprocessable() {
    let (service, _) = common::service();
    let router = survey_router(service);

    let response = router
        .oneshot(post(
            "/api/v1/survey/participants",
            json!({
                "name": "",
                "age": 30,
                "profession": "student",
                "email": "someone@example.com",
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        json_body(response).await["error"],
        "participant name is required"
    );
}

#[tokio::test]
async fn unknown_participant_lookup_is_not_found() {
    let (service, _) = common::service();
    let router = survey_router(service);

    let response = router
        .oneshot(get("/api/v1/survey/participants/participant-000000"))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
