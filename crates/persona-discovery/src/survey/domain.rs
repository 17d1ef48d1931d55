use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of questions every completed answer set covers.
pub const QUESTION_COUNT: usize = 10;

/// Answer-option identifier shared by every question.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Label {
    A,
    B,
    C,
    D,
}

impl Label {
    pub const ALL: [Label; 4] = [Label::A, Label::B, Label::C, Label::D];

    pub const fn as_str(self) -> &'static str {
        match self {
            Label::A => "A",
            Label::B => "B",
            Label::C => "C",
            Label::D => "D",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Label::A => 0,
            Label::B => 1,
            Label::C => 2,
            Label::D => 3,
        }
    }

    /// Strict parse: only the exact uppercase identifiers are accepted.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "A" => Some(Label::A),
            "B" => Some(Label::B),
            "C" => Some(Label::C),
            "D" => Some(Label::D),
            _ => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of personality types the classifier can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassificationType {
    SilentSentinel,
    WatchfulGardener,
    EmpathicAnchor,
    MaskedJester,
    AdaptiveHybrid,
    AmbivalentType,
}

impl ClassificationType {
    pub const ALL: [ClassificationType; 6] = [
        ClassificationType::SilentSentinel,
        ClassificationType::WatchfulGardener,
        ClassificationType::EmpathicAnchor,
        ClassificationType::MaskedJester,
        ClassificationType::AdaptiveHybrid,
        ClassificationType::AmbivalentType,
    ];

    pub const fn for_label(label: Label) -> Self {
        match label {
            Label::A => ClassificationType::SilentSentinel,
            Label::B => ClassificationType::WatchfulGardener,
            Label::C => ClassificationType::EmpathicAnchor,
            Label::D => ClassificationType::MaskedJester,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ClassificationType::SilentSentinel => "Silent Sentinel",
            ClassificationType::WatchfulGardener => "Watchful Gardener",
            ClassificationType::EmpathicAnchor => "Empathic Anchor",
            ClassificationType::MaskedJester => "Masked Jester",
            ClassificationType::AdaptiveHybrid => "Adaptive Hybrid",
            ClassificationType::AmbivalentType => "Ambivalent Type",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            ClassificationType::SilentSentinel => 0,
            ClassificationType::WatchfulGardener => 1,
            ClassificationType::EmpathicAnchor => 2,
            ClassificationType::MaskedJester => 3,
            ClassificationType::AdaptiveHybrid => 4,
            ClassificationType::AmbivalentType => 5,
        }
    }

    pub const fn is_composite(self) -> bool {
        matches!(
            self,
            ClassificationType::AdaptiveHybrid | ClassificationType::AmbivalentType
        )
    }
}

impl fmt::Display for ClassificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Unvalidated answers as handed over by the input-collection collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseSheet {
    pub answers: BTreeMap<u32, String>,
}

impl ResponseSheet {
    pub fn new(answers: BTreeMap<u32, String>) -> Self {
        Self { answers }
    }

    /// Builds a sheet answering questions `1..=labels.len()` in order.
    pub fn from_labels<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = Label>,
    {
        let answers = labels
            .into_iter()
            .enumerate()
            .map(|(idx, label)| (idx as u32 + 1, label.as_str().to_string()))
            .collect();
        Self { answers }
    }
}

/// Completed answer set: one label per catalog question, ordered by question id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerSet {
    choices: [Label; QUESTION_COUNT],
}

impl AnswerSet {
    pub const fn from_labels(choices: [Label; QUESTION_COUNT]) -> Self {
        Self { choices }
    }

    pub fn choice(&self, question_id: u8) -> Option<Label> {
        let idx = usize::from(question_id).checked_sub(1)?;
        self.choices.get(idx).copied()
    }

    /// Iterates `(question_id, label)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, Label)> + '_ {
        self.choices
            .iter()
            .enumerate()
            .map(|(idx, label)| (idx as u8 + 1, *label))
    }

    pub fn labels(&self) -> &[Label; QUESTION_COUNT] {
        &self.choices
    }

    pub fn to_map(&self) -> BTreeMap<u8, Label> {
        self.iter().collect()
    }
}

/// Identifier wrapper for registered participants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticipantId(pub String);

/// Identifier wrapper for stored survey responses.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResponseId(pub String);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl ResponseId {
    /// Numeric suffix of a generated id; `response-000042` is 42.
    pub fn sequence(&self) -> Option<u64> {
        self.0.rsplit('-').next()?.parse().ok()
    }
}

impl fmt::Display for ResponseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Profession {
    Student,
    Working,
}

impl Profession {
    pub const fn label(self) -> &'static str {
        match self {
            Profession::Student => "student",
            Profession::Working => "working",
        }
    }
}

/// Registration form captured before the questionnaire starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantRegistration {
    pub name: String,
    pub age: u32,
    pub profession: Profession,
    pub email: String,
}

/// Registered participant after intake validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub participant_id: ParticipantId,
    pub name: String,
    pub age: u8,
    pub profession: Profession,
    pub email: String,
    pub registered_at: DateTime<Utc>,
}

/// Completed questionnaire submitted on behalf of a participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveySubmission {
    pub participant_id: ParticipantId,
    pub answers: BTreeMap<u32, String>,
}

impl SurveySubmission {
    pub fn sheet(&self) -> ResponseSheet {
        ResponseSheet::new(self.answers.clone())
    }
}
