use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use persona_discovery::survey::{
    admin_router, survey_router, NotificationPublisher, SurveyRepository, SurveyService,
};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_survey_routes<R, N>(
    service: Arc<SurveyService<R, N>>,
    admin_reset_enabled: bool,
) -> axum::Router
where
    R: SurveyRepository + 'static,
    N: NotificationPublisher + 'static,
{
    let router = survey_router(service.clone());
    let router = if admin_reset_enabled {
        router.merge(admin_router(service))
    } else {
        router
    };

    router
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
