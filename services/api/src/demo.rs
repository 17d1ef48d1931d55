use crate::infra::{parse_answers, InMemorySurveyRepository, LoggingNotificationPublisher};
use clap::Args;
use persona_discovery::error::AppError;
use persona_discovery::survey::{
    BatchClassifier, BatchOutcome, ClassificationEngine, ClassificationResult, Label,
    ParticipantRegistration, Profession, ResponseSheet, SurveyService, SurveySubmission,
};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ClassifyArgs {
    /// Comma-separated answers for questions 1..10, e.g. C,B,C,A,...
    #[arg(
        long,
        value_parser = parse_answers,
        conflicts_with = "csv",
        required_unless_present = "csv"
    )]
    pub(crate) answers: Option<ResponseSheet>,
    /// CSV file with one answer sheet per row (columns q1..q10, optional respondent)
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Emit JSON instead of the text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Participant name used for the demo registration.
    #[arg(long, default_value = "Demo Participant")]
    pub(crate) name: String,
    /// Participant e-mail used for the demo registration.
    #[arg(long, default_value = "demo.participant@example.com")]
    pub(crate) email: String,
    /// Answers to submit; defaults to a balanced caution/openness sheet.
    #[arg(long, value_parser = parse_answers)]
    pub(crate) answers: Option<ResponseSheet>,
}

pub(crate) fn run_questions() -> Result<(), AppError> {
    let engine = ClassificationEngine::standard()?;

    println!("Personality Discovery questionnaire");
    for question in engine.questions().all() {
        println!("\n{}. {}", question.id, question.prompt);
        if let Some(hint) = question.example_hint {
            println!("   ({hint})");
        }
        for option in &question.options {
            println!("   {}) {}", option.label, option.text);
        }
    }

    Ok(())
}

pub(crate) fn run_classify(args: ClassifyArgs) -> Result<(), AppError> {
    let ClassifyArgs { answers, csv, json } = args;
    let engine = ClassificationEngine::standard()?;

    if let Some(path) = csv {
        let outcomes = BatchClassifier::from_path(&engine, path)?;
        if json {
            let rows: Vec<_> = outcomes.iter().map(batch_row_json).collect();
            print_json(&json!({ "rows": rows }));
        } else {
            render_batch(&outcomes);
        }
        return Ok(());
    }

    let sheet = answers.unwrap_or_default();
    let result = engine.classify(&sheet)?;
    if json {
        print_json(&result);
    } else {
        render_result(&result);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        name,
        email,
        answers,
    } = args;

    let engine = Arc::new(ClassificationEngine::standard()?);
    let repository = Arc::new(InMemorySurveyRepository::default());
    let notifications = Arc::new(LoggingNotificationPublisher::default());
    let service = SurveyService::new(engine, repository, notifications.clone());

    println!("Personality Discovery demo");
    let participant = service.register(ParticipantRegistration {
        name,
        age: 24,
        profession: Profession::Student,
        email,
    })?;
    println!(
        "- Registered {} <{}> as {}",
        participant.name, participant.email, participant.participant_id
    );

    let sheet = answers.unwrap_or_else(|| ResponseSheet::from_labels(demo_labels()));
    let record = service.submit(SurveySubmission {
        participant_id: participant.participant_id.clone(),
        answers: sheet.answers,
    })?;
    println!(
        "- Stored response {} at {}",
        record.response_id,
        record.submitted_at.to_rfc3339()
    );
    println!();
    render_result(&record.result);

    let events = notifications.events();
    if events.is_empty() {
        println!("\nNotifications: none dispatched");
    } else {
        println!("\nNotifications:");
        for event in events {
            println!(
                "  - {} -> {}: {} ({})",
                event.sender,
                event.recipient,
                event.profile.name,
                event.confidence_band.label()
            );
        }
    }

    Ok(())
}

fn demo_labels() -> [Label; 10] {
    use Label::*;
    [C, B, C, B, C, B, A, C, B, D]
}

fn render_result(result: &ClassificationResult) {
    let profile = &result.profile;
    println!("{} {}", profile.animal_glyph, profile.name);
    println!(
        "Classification: {} | Confidence: {} | Score: {}",
        result.classification,
        result.confidence_band.label(),
        result.tally.total_score
    );
    let counts: Vec<_> = Label::ALL
        .iter()
        .map(|label| format!("{}={}", label, result.tally.count(*label)))
        .collect();
    println!("Answer counts: {}", counts.join(" "));
    println!("\n{}", profile.description);
    render_list("Traits", profile.traits);
    render_list("Strengths", profile.strengths);
    render_list("Watch-outs", profile.weaknesses);
    render_list("Career fit", profile.career_fit);
    render_list("Recommendations", profile.recommendations);
    println!("\nWhy: {}", profile.reasoning);
}

fn render_list(title: &str, items: &[&str]) {
    println!("{title}:");
    for item in items {
        println!("  - {item}");
    }
}

fn render_batch(outcomes: &[BatchOutcome]) {
    println!("Classified {} row(s)", outcomes.len());
    for outcome in outcomes {
        let who = outcome
            .respondent
            .as_deref()
            .map(|name| format!(" ({name})"))
            .unwrap_or_default();
        match &outcome.outcome {
            Ok(result) => println!(
                "- row {}{}: {} {} [{}] score {}",
                outcome.row,
                who,
                result.profile.animal_glyph,
                result.classification,
                result.confidence_band.label(),
                result.tally.total_score
            ),
            Err(err) => println!("- row {}{}: rejected: {}", outcome.row, who, err),
        }
    }
}

fn batch_row_json(outcome: &BatchOutcome) -> serde_json::Value {
    match &outcome.outcome {
        Ok(result) => json!({
            "row": outcome.row,
            "respondent": outcome.respondent,
            "result": result,
        }),
        Err(err) => json!({
            "row": outcome.row,
            "respondent": outcome.respondent,
            "error": err.to_string(),
        }),
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("JSON output unavailable: {err}"),
    }
}
