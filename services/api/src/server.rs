use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySurveyRepository, LoggingNotificationPublisher};
use crate::routes::with_survey_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use persona_discovery::config::AppConfig;
use persona_discovery::error::AppError;
use persona_discovery::survey::{ClassificationEngine, SurveyService};
use persona_discovery::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    // Catalog checks run here; a broken questionnaire or profile table stops startup.
    let engine = Arc::new(ClassificationEngine::standard()?);
    info!(
        questions = engine.questions().all().len(),
        "questionnaire catalogs validated"
    );

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemorySurveyRepository::default());
    let notifications = Arc::new(LoggingNotificationPublisher::default());
    let survey_service = Arc::new(
        SurveyService::new(engine, repository, notifications)
            .with_sender(config.notifications.sender.clone()),
    );

    if config.survey.admin_reset_enabled {
        warn!("admin reset route enabled");
    }

    let app = with_survey_routes(survey_service, config.survey.admin_reset_enabled)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "persona discovery service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
