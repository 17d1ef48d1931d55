use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::super::catalog::QuestionCatalog;
use super::super::domain::{AnswerSet, Label, ResponseSheet, QUESTION_COUNT};
use super::ClassificationError;

/// Per-label counts plus the weighted aggregate score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Always carries all four labels, zero counts included.
    pub counts: BTreeMap<Label, u8>,
    pub total_score: i32,
}

impl Tally {
    pub fn count(&self, label: Label) -> u8 {
        self.counts.get(&label).copied().unwrap_or(0)
    }

    pub fn answered(&self) -> u32 {
        self.counts.values().map(|count| u32::from(*count)).sum()
    }

    pub fn standings(&self) -> Standings {
        let top_count = Label::ALL
            .iter()
            .map(|label| self.count(*label))
            .max()
            .unwrap_or(0);
        let leaders: Vec<Label> = Label::ALL
            .iter()
            .copied()
            .filter(|label| self.count(*label) == top_count)
            .collect();
        let runner_up_count = if leaders.len() > 1 {
            top_count
        } else {
            Label::ALL
                .iter()
                .filter(|label| !leaders.contains(label))
                .map(|label| self.count(*label))
                .max()
                .unwrap_or(0)
        };

        Standings {
            leaders,
            top_count,
            runner_up_count,
        }
    }
}

/// Ranking summary shared by the classifier and the rating engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standings {
    /// Labels reaching `top_count`, in label order.
    pub leaders: Vec<Label>,
    pub top_count: u8,
    /// Equals `top_count` when first place is tied.
    pub runner_up_count: u8,
}

impl Standings {
    pub fn gap(&self) -> u8 {
        self.top_count - self.runner_up_count
    }
}

/// Checks a raw sheet against the catalog before anything is counted.
///
/// Missing ids are reported first (all of them), then the first invalid label in
/// id order, then any id the catalog does not define.
pub fn validate_sheet(
    sheet: &ResponseSheet,
    questions: &QuestionCatalog,
) -> Result<AnswerSet, ClassificationError> {
    let mut choices = [Label::A; QUESTION_COUNT];
    let mut missing = Vec::new();
    let mut invalid = None;

    for (slot, question) in choices.iter_mut().zip(questions.all()) {
        match sheet.answers.get(&u32::from(question.id)) {
            None => missing.push(question.id),
            Some(raw) => match Label::parse(raw) {
                Some(label) => *slot = label,
                None => {
                    if invalid.is_none() {
                        invalid = Some(ClassificationError::InvalidLabel {
                            question_id: question.id,
                            value: raw.clone(),
                        });
                    }
                }
            },
        }
    }

    if !missing.is_empty() {
        return Err(ClassificationError::IncompleteResponse { missing });
    }
    if let Some(error) = invalid {
        return Err(error);
    }
    if let Some(question_id) = sheet
        .answers
        .keys()
        .find(|id| questions.get(**id).is_err())
    {
        return Err(ClassificationError::UnexpectedQuestion {
            question_id: *question_id,
        });
    }

    Ok(AnswerSet::from_labels(choices))
}

/// Counts labels and sums the chosen option weights.
pub fn tally_answers(answers: &AnswerSet, questions: &QuestionCatalog) -> Tally {
    let mut counts: BTreeMap<Label, u8> = Label::ALL.iter().map(|label| (*label, 0)).collect();
    let mut total_score = 0;

    for (question, (_, label)) in questions.all().iter().zip(answers.iter()) {
        *counts.entry(label).or_insert(0) += 1;
        total_score += question.option(label).weight;
    }

    Tally {
        counts,
        total_score,
    }
}
