use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tracing::error;

use super::domain::{
    ParticipantId, ParticipantRegistration, ResponseId, ResponseSheet, SurveySubmission,
};
use super::export::write_responses_csv;
use super::repository::{NotificationPublisher, RepositoryError, SurveyRepository};
use super::service::{SurveyService, SurveyServiceError};

/// Router builder exposing questionnaire, intake, and result endpoints.
pub fn survey_router<R, N>(service: Arc<SurveyService<R, N>>) -> Router
where
    R: SurveyRepository + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route("/api/v1/survey/questions", get(questions_handler::<R, N>))
        .route("/api/v1/survey/classify", post(classify_handler::<R, N>))
        .route(
            "/api/v1/survey/participants",
            post(register_handler::<R, N>),
        )
        .route(
            "/api/v1/survey/participants/:participant_id",
            get(participant_handler::<R, N>),
        )
        .route(
            "/api/v1/survey/responses",
            post(submit_handler::<R, N>).get(list_handler::<R, N>),
        )
        .route(
            "/api/v1/survey/responses/:response_id",
            get(response_handler::<R, N>),
        )
        .route(
            "/api/v1/survey/exports/responses.csv",
            get(export_handler::<R, N>),
        )
        .with_state(service)
}

/// Destructive reset route; mounted only when explicitly enabled.
pub fn admin_router<R, N>(service: Arc<SurveyService<R, N>>) -> Router
where
    R: SurveyRepository + 'static,
    N: NotificationPublisher + 'static,
{
    Router::new()
        .route("/api/v1/survey/admin/clear", post(clear_handler::<R, N>))
        .with_state(service)
}

fn error_response(error: SurveyServiceError) -> Response {
    let status = match &error {
        SurveyServiceError::Intake(_) | SurveyServiceError::Classification(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        SurveyServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        SurveyServiceError::ParticipantNotFound(_)
        | SurveyServiceError::ResponseNotFound(_)
        | SurveyServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        SurveyServiceError::Repository(RepositoryError::Unavailable(_)) => {
            error!(error = %error, "survey repository unavailable");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let message = match &error {
        SurveyServiceError::Repository(RepositoryError::Conflict) => {
            "participant already registered".to_string()
        }
        other => other.to_string(),
    };

    (status, axum::Json(json!({ "error": message }))).into_response()
}

pub(crate) async fn questions_handler<R, N>(
    State(service): State<Arc<SurveyService<R, N>>>,
) -> Response
where
    R: SurveyRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let questions = service.engine().questions().views();
    (StatusCode::OK, axum::Json(json!({ "questions": questions }))).into_response()
}

pub(crate) async fn classify_handler<R, N>(
    State(service): State<Arc<SurveyService<R, N>>>,
    axum::Json(sheet): axum::Json<ResponseSheet>,
) -> Response
where
    R: SurveyRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.classify(&sheet) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn register_handler<R, N>(
    State(service): State<Arc<SurveyService<R, N>>>,
    axum::Json(registration): axum::Json<ParticipantRegistration>,
) -> Response
where
    R: SurveyRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.register(registration) {
        Ok(participant) => (StatusCode::CREATED, axum::Json(participant)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn participant_handler<R, N>(
    State(service): State<Arc<SurveyService<R, N>>>,
    Path(participant_id): Path<String>,
) -> Response
where
    R: SurveyRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.participant(&ParticipantId(participant_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_handler<R, N>(
    State(service): State<Arc<SurveyService<R, N>>>,
    axum::Json(submission): axum::Json<SurveySubmission>,
) -> Response
where
    R: SurveyRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.submit(submission) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R, N>(
    State(service): State<Arc<SurveyService<R, N>>>,
) -> Response
where
    R: SurveyRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.responses() {
        Ok(records) => (StatusCode::OK, axum::Json(json!({ "responses": records }))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn response_handler<R, N>(
    State(service): State<Arc<SurveyService<R, N>>>,
    Path(response_id): Path<String>,
) -> Response
where
    R: SurveyRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.response(&ResponseId(response_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn export_handler<R, N>(
    State(service): State<Arc<SurveyService<R, N>>>,
) -> Response
where
    R: SurveyRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let records = match service.responses() {
        Ok(records) => records,
        Err(error) => return error_response(error),
    };

    let mut body = Vec::new();
    if let Err(err) = write_responses_csv(&mut body, &records) {
        error!(error = %err, "response export failed");
        let payload = json!({ "error": format!("export failed: {err}") });
        return (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response();
    }

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"responses.csv\"",
            ),
        ],
        body,
    )
        .into_response()
}

pub(crate) async fn clear_handler<R, N>(
    State(service): State<Arc<SurveyService<R, N>>>,
) -> Response
where
    R: SurveyRepository + 'static,
    N: NotificationPublisher + 'static,
{
    match service.reset() {
        Ok(()) => (StatusCode::OK, axum::Json(json!({ "status": "cleared" }))).into_response(),
        Err(error) => error_response(error),
    }
}
