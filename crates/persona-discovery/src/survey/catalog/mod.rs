//! Static questionnaire and profile tables.
//!
//! Both catalogs are `'static` data compiled into the binary. `validate` on each is the
//! startup consistency check; a failure there is a configuration defect and the service
//! must not start serving traffic.

mod profiles;
mod questions;

pub use profiles::{Profile, ProfileCatalog, ProfileEntry, STANDARD_PROFILES};
pub use questions::{AnswerOption, OptionView, Question, QuestionCatalog, QuestionView, STANDARD_QUESTIONS};

use super::domain::ClassificationType;

/// Catalog misuse or catalog/enum mismatch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown question id {0}")]
    UnknownQuestion(u32),
    #[error("no profile registered for classification type '{0}'")]
    UnknownProfile(ClassificationType),
    #[error("classification type '{0}' has more than one profile")]
    DuplicateProfile(ClassificationType),
    #[error("question {question_id} must offer options A, B, C, D exactly once and in order")]
    MalformedQuestion { question_id: u8 },
    #[error("question catalog must hold {expected} questions, found {found}")]
    QuestionCount { expected: usize, found: usize },
    #[error(
        "question catalog must hold ids in ascending order from 1 (found id {found} at position {position})"
    )]
    QuestionOrder { position: usize, found: u8 },
}
