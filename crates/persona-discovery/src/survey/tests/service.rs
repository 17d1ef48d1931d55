use super::common::*;
use crate::survey::domain::{ClassificationType, Label, ParticipantId, ResponseId};
use crate::survey::engine::{ClassificationError, ConfidenceBand};
use crate::survey::intake::IntakeViolation;
use crate::survey::repository::{RepositoryError, SurveyRepository};
use crate::survey::{SurveyService, SurveyServiceError, DEFAULT_NOTIFICATION_SENDER};
use std::sync::Arc;

#[test]
fn register_normalizes_and_assigns_sequential_ids() {
    let (service, repository, _) = build_service();

    let participant = service
        .register(registration("Maya@Example.com"))
        .expect("registration succeeds");

    assert!(participant.participant_id.0.starts_with("participant-"));
    assert_eq!(participant.participant_id.0.len(), "participant-000000".len());
    assert_eq!(participant.name, "Maya Fernandes");
    assert_eq!(participant.email, "maya@example.com");
    assert!(repository
        .fetch_participant(&participant.participant_id)
        .expect("fetch succeeds")
        .is_some());
}

#[test]
fn register_rejects_duplicate_email_after_normalization() {
    let (service, _, _) = build_service();
    service
        .register(registration("maya@example.com"))
        .expect("first registration");

    match service.register(registration("MAYA@example.com")) {
        Err(SurveyServiceError::Repository(RepositoryError::Conflict)) => {}
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[test]
fn register_propagates_intake_violations() {
    let (service, _, _) = build_service();
    let mut registration = registration("kid@example.com");
    registration.age = 3;

    match service.register(registration) {
        Err(SurveyServiceError::Intake(IntakeViolation::AgeOutOfRange { age: 3 })) => {}
        other => panic!("expected intake violation, got {other:?}"),
    }
}

#[test]
fn submit_classifies_on_server_and_notifies_participant() {
    let (service, repository, notifications) = build_service();
    let participant = service
        .register(registration("maya@example.com"))
        .expect("registration succeeds");

    let record = service
        .submit(submission(&participant.participant_id, hybrid_labels()))
        .expect("submission succeeds");

    assert!(record.response_id.0.starts_with("response-"));
    assert_eq!(record.classification(), ClassificationType::AdaptiveHybrid);
    assert_eq!(record.confidence_band(), ConfidenceBand::Mild);
    assert_eq!(record.answers.get(&1), Some(&Label::B));
    assert_eq!(record.answers.len(), 10);
    assert_eq!(repository.response_count(), 1);

    let events = notifications.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].recipient, "maya@example.com");
    assert_eq!(events[0].sender, DEFAULT_NOTIFICATION_SENDER);
    assert_eq!(events[0].response_id, record.response_id);
    assert_eq!(events[0].profile.name, "The Adaptive Hybrid");
}

#[test]
fn submit_requires_registered_participant() {
    let (service, repository, notifications) = build_service();
    let missing = ParticipantId("participant-999999".to_string());

    match service.submit(submission(&missing, [Label::C; 10])) {
        Err(SurveyServiceError::ParticipantNotFound(id)) => assert_eq!(id, missing),
        other => panic!("expected participant not found, got {other:?}"),
    }
    assert_eq!(repository.response_count(), 0);
    assert!(notifications.events().is_empty());
}

#[test]
fn submit_rejects_incomplete_answers_without_storing() {
    let (service, repository, notifications) = build_service();
    let participant = service
        .register(registration("maya@example.com"))
        .expect("registration succeeds");
    let mut submission = submission(&participant.participant_id, [Label::C; 10]);
    submission.answers.remove(&4);

    match service.submit(submission) {
        Err(SurveyServiceError::Classification(ClassificationError::IncompleteResponse {
            missing,
        })) => assert_eq!(missing, vec![4]),
        other => panic!("expected incomplete response, got {other:?}"),
    }
    assert_eq!(repository.response_count(), 0);
    assert!(notifications.events().is_empty());
}

#[test]
fn notification_failure_does_not_fail_submission() {
    let repository = Arc::new(MemoryRepository::default());
    let service = SurveyService::new(engine(), repository.clone(), Arc::new(OfflineNotifications));
    let participant = service
        .register(registration("offline@example.com"))
        .expect("registration succeeds");

    let record = service
        .submit(submission(&participant.participant_id, [Label::A; 10]))
        .expect("submission still succeeds");

    assert_eq!(record.classification(), ClassificationType::SilentSentinel);
    assert_eq!(repository.response_count(), 1);
}

#[test]
fn participant_view_lists_responses_newest_first() {
    let (service, _, _) = build_service();
    let participant = service
        .register(registration("maya@example.com"))
        .expect("registration succeeds");

    let first = service
        .submit(submission(&participant.participant_id, [Label::A; 10]))
        .expect("first submission");
    let second = service
        .submit(submission(&participant.participant_id, [Label::C; 10]))
        .expect("second submission");

    let view = service
        .participant(&participant.participant_id)
        .expect("participant view");
    let ids: Vec<_> = view
        .responses
        .iter()
        .map(|record| record.response_id.clone())
        .collect();
    assert_eq!(ids, vec![second.response_id.clone(), first.response_id.clone()]);

    let all = service.responses().expect("list succeeds");
    assert_eq!(all[0].response_id, second.response_id);
}

#[test]
fn response_lookup_reports_missing_ids() {
    let (service, _, _) = build_service();

    match service.response(&ResponseId("response-000000".to_string())) {
        Err(SurveyServiceError::ResponseNotFound(id)) => assert_eq!(id.0, "response-000000"),
        other => panic!("expected response not found, got {other:?}"),
    }
}

#[test]
fn reset_clears_participants_and_responses() {
    let (service, repository, _) = build_service();
    let participant = service
        .register(registration("maya@example.com"))
        .expect("registration succeeds");
    service
        .submit(submission(&participant.participant_id, [Label::D; 10]))
        .expect("submission succeeds");

    service.reset().expect("reset succeeds");

    assert_eq!(repository.response_count(), 0);
    assert!(matches!(
        service.participant(&participant.participant_id),
        Err(SurveyServiceError::ParticipantNotFound(_))
    ));
}

#[test]
fn custom_sender_is_used_for_notifications() {
    let repository = Arc::new(MemoryRepository::default());
    let notifications = Arc::new(MemoryNotifications::default());
    let service = SurveyService::new(engine(), repository, notifications.clone())
        .with_sender("results@example.org");
    let participant = service
        .register(registration("maya@example.com"))
        .expect("registration succeeds");

    service
        .submit(submission(&participant.participant_id, [Label::B; 10]))
        .expect("submission succeeds");

    assert_eq!(notifications.events()[0].sender, "results@example.org");
}

#[test]
fn repository_outage_surfaces_as_repository_error() {
    let service = SurveyService::new(
        engine(),
        Arc::new(UnavailableRepository),
        Arc::new(MemoryNotifications::default()),
    );

    match service.responses() {
        Err(SurveyServiceError::Repository(RepositoryError::Unavailable(reason))) => {
            assert_eq!(reason, "database offline")
        }
        other => panic!("expected unavailable repository, got {other:?}"),
    }
}
