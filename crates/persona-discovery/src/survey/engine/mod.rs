mod classifier;
mod rating;
mod tally;

pub use classifier::classify;
pub use rating::{rate, ConfidenceBand, MODERATE_MIN_GAP, STRONG_MIN_GAP, VERY_STRONG_MIN_GAP};
pub use tally::{tally_answers, validate_sheet, Standings, Tally};

use serde::Serialize;
use tracing::debug;

use super::catalog::{CatalogError, Profile, ProfileCatalog, QuestionCatalog};
use super::domain::{AnswerSet, ClassificationType, ResponseSheet};

/// Input problems that stop a response sheet from being classified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassificationError {
    #[error("response is incomplete; unanswered questions: {missing:?}")]
    IncompleteResponse { missing: Vec<u8> },
    #[error("question {question_id} has invalid answer '{value}' (expected one of A, B, C, D)")]
    InvalidLabel { question_id: u8, value: String },
    #[error("question id {question_id} is not part of the questionnaire")]
    UnexpectedQuestion { question_id: u32 },
}

/// Full outcome handed to presentation, storage, and notifications.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub tally: Tally,
    pub classification: ClassificationType,
    pub confidence_band: ConfidenceBand,
    pub profile: Profile,
}

/// Stateless classifier over a validated pair of catalogs.
///
/// Construction runs both catalog checks, so a built engine can always resolve a
/// profile for whatever type the classifier returns. Safe to share across threads.
#[derive(Debug, Clone)]
pub struct ClassificationEngine {
    questions: QuestionCatalog,
    profiles: Vec<Profile>,
}

impl ClassificationEngine {
    pub fn new(questions: QuestionCatalog, profiles: ProfileCatalog) -> Result<Self, CatalogError> {
        questions.validate()?;
        let profiles = profiles.resolve_all()?;
        Ok(Self {
            questions,
            profiles,
        })
    }

    /// Engine over the compiled-in questionnaire and profile tables.
    pub fn standard() -> Result<Self, CatalogError> {
        Self::new(QuestionCatalog::standard(), ProfileCatalog::standard())
    }

    pub fn questions(&self) -> &QuestionCatalog {
        &self.questions
    }

    pub fn profile_for(&self, kind: ClassificationType) -> &Profile {
        &self.profiles[kind.index()]
    }

    pub fn tally(&self, sheet: &ResponseSheet) -> Result<Tally, ClassificationError> {
        let answers = validate_sheet(sheet, &self.questions)?;
        Ok(tally_answers(&answers, &self.questions))
    }

    pub fn classify(&self, sheet: &ResponseSheet) -> Result<ClassificationResult, ClassificationError> {
        let answers = validate_sheet(sheet, &self.questions)?;
        Ok(self.classify_answers(&answers))
    }

    /// Classifies an already validated answer set; infallible.
    pub fn classify_answers(&self, answers: &AnswerSet) -> ClassificationResult {
        let tally = tally_answers(answers, &self.questions);
        let classification = classify(&tally);
        let confidence_band = rate(&tally);

        debug!(
            classification = %classification,
            confidence_band = confidence_band.label(),
            total_score = tally.total_score,
            "classified response sheet"
        );

        ClassificationResult {
            profile: *self.profile_for(classification),
            tally,
            classification,
            confidence_band,
        }
    }
}
