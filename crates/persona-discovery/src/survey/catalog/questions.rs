use serde::Serialize;

use super::super::domain::{Label, QUESTION_COUNT};
use super::CatalogError;

/// One selectable answer and its contribution to the aggregate score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerOption {
    pub label: Label,
    pub text: &'static str,
    pub weight: i32,
}

/// Questionnaire item. Options are stored in label order (A, B, C, D).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: u8,
    pub prompt: &'static str,
    pub example_hint: Option<&'static str>,
    pub options: [AnswerOption; 4],
}

impl Question {
    /// Option bearing `label`. Relies on the label-order invariant checked by
    /// [`QuestionCatalog::validate`].
    pub fn option(&self, label: Label) -> &AnswerOption {
        &self.options[label.index()]
    }

    pub fn weight_range(&self) -> (i32, i32) {
        let min = self.options.iter().map(|option| option.weight).min().unwrap_or(0);
        let max = self.options.iter().map(|option| option.weight).max().unwrap_or(0);
        (min, max)
    }

    pub fn view(&self) -> QuestionView {
        QuestionView {
            id: self.id,
            prompt: self.prompt,
            example_hint: self.example_hint,
            options: self
                .options
                .iter()
                .map(|option| OptionView {
                    label: option.label,
                    text: option.text,
                })
                .collect(),
        }
    }
}

/// Display form of a question; weights stay server-side.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub id: u8,
    pub prompt: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example_hint: Option<&'static str>,
    pub options: Vec<OptionView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionView {
    pub label: Label,
    pub text: &'static str,
}

/// Read-only view over an ordered question table.
#[derive(Debug, Clone, Copy)]
pub struct QuestionCatalog {
    questions: &'static [Question],
}

impl Default for QuestionCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl QuestionCatalog {
    pub const fn standard() -> Self {
        Self::from_static(&STANDARD_QUESTIONS)
    }

    pub const fn from_static(questions: &'static [Question]) -> Self {
        Self { questions }
    }

    pub fn all(&self) -> &'static [Question] {
        self.questions
    }

    pub fn get(&self, id: u32) -> Result<&'static Question, CatalogError> {
        self.questions
            .iter()
            .find(|question| u32::from(question.id) == id)
            .ok_or(CatalogError::UnknownQuestion(id))
    }

    /// Lowest and highest reachable `total_score`.
    pub fn score_bounds(&self) -> (i32, i32) {
        self.questions
            .iter()
            .map(Question::weight_range)
            .fold((0, 0), |(low, high), (min, max)| (low + min, high + max))
    }

    pub fn views(&self) -> Vec<QuestionView> {
        self.questions.iter().map(Question::view).collect()
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.questions.len() != QUESTION_COUNT {
            return Err(CatalogError::QuestionCount {
                expected: QUESTION_COUNT,
                found: self.questions.len(),
            });
        }

        for (position, question) in self.questions.iter().enumerate() {
            if usize::from(question.id) != position + 1 {
                return Err(CatalogError::QuestionOrder {
                    position,
                    found: question.id,
                });
            }

            let in_label_order = question
                .options
                .iter()
                .zip(Label::ALL)
                .all(|(option, label)| option.label == label);
            if !in_label_order {
                return Err(CatalogError::MalformedQuestion {
                    question_id: question.id,
                });
            }
        }

        Ok(())
    }
}

const fn option(label: Label, text: &'static str, weight: i32) -> AnswerOption {
    AnswerOption {
        label,
        text,
        weight,
    }
}

/// Questionnaire content. Ids, labels, and weights must stay stable so stored
/// historical responses keep their meaning.
pub static STANDARD_QUESTIONS: [Question; QUESTION_COUNT] = [
    Question {
        id: 1,
        prompt: "Your team makes a mistake in a project. What's your first instinct?",
        example_hint: Some("Example: Missing deadline or miscommunication"),
        options: [
            option(Label::A, "Handle it privately without involving others", -2),
            option(Label::B, "Think it through before discussing with them", -1),
            option(Label::C, "Talk to them immediately to solve it together", 2),
            option(Label::D, "Blame them and distance yourself", -2),
        ],
    },
    Question {
        id: 2,
        prompt: "A friend is going through a tough time and reaches out to you. You:",
        example_hint: Some("Example: Career crisis, breakup, or family issue"),
        options: [
            option(Label::A, "Feel uncomfortable and avoid the topic", -2),
            option(Label::B, "Listen but keep things surface-level", -1),
            option(Label::C, "Listen deeply and offer genuine support", 2),
            option(Label::D, "Change the subject to something lighter", -2),
        ],
    },
    Question {
        id: 3,
        prompt: "At a social gathering, you feel anxious. You:",
        example_hint: Some("Example: Work party, family reunion, or new friend group"),
        options: [
            option(Label::A, "Leave early or stay isolated in corners", -2),
            option(Label::B, "Stick with familiar people, observe from distance", -1),
            option(Label::C, "Engage openly, start conversations naturally", 2),
            option(Label::D, "Make sarcastic comments or act uninterested", -1),
        ],
    },
    Question {
        id: 4,
        prompt: "Someone gives you critical feedback about your work. You:",
        example_hint: Some("Example: Boss or peer points out improvement area"),
        options: [
            option(Label::A, "Feel hurt and don't want to engage further", -1),
            option(Label::B, "Accept it cautiously and think about it later", 0),
            option(Label::C, "Ask questions and see how you can improve", 2),
            option(Label::D, "Dismiss it or get defensive", -2),
        ],
    },
    Question {
        id: 5,
        prompt: "You're feeling stressed or sad at work. Your colleague notices. You:",
        example_hint: Some("Example: Bad day, personal issue affecting focus"),
        options: [
            option(Label::A, "Hide it and say everything's fine", -2),
            option(Label::B, "Mention something vague to avoid detailed conversation", -1),
            option(Label::C, "Open up and share what's troubling you", 2),
            option(Label::D, "Joke about it or get irritable", -1),
        ],
    },
    Question {
        id: 6,
        prompt: "A close friend hasn't reached out in weeks. You:",
        example_hint: Some("Example: Friendship seems strained or fading"),
        options: [
            option(Label::A, "Assume they don't want contact and disappear", -2),
            option(Label::B, "Wait for them to make the first move", -1),
            option(Label::C, "Reach out genuinely to reconnect", 2),
            option(Label::D, "Feel hurt and act cold toward them", -1),
        ],
    },
    Question {
        id: 7,
        prompt: "You need help with something you're struggling with. You:",
        example_hint: Some("Example: Technical skills, emotional support, or advice"),
        options: [
            option(Label::A, "Try to figure it out alone, never ask", -2),
            option(Label::B, "Only ask close people when absolutely necessary", -1),
            option(Label::C, "Ask openly and aren't embarrassed about needing help", 2),
            option(Label::D, "Feel too pride-hurt to ask anyone", -2),
        ],
    },
    Question {
        id: 8,
        prompt: "Your partner/friend misunderstands your intentions. You:",
        example_hint: Some("Example: They think you were rude when you were joking"),
        options: [
            option(Label::A, "Let it slide and avoid clarifying", -1),
            option(Label::B, "Explain later when emotions settle", 0),
            option(Label::C, "Address it right away with care", 2),
            option(Label::D, "Get defensive or distance yourself", -1),
        ],
    },
    Question {
        id: 9,
        prompt: "You see a colleague struggling with their workload. You:",
        example_hint: Some("Example: They seem overwhelmed or stressed"),
        options: [
            option(Label::A, "Mind your own business\u{2014}not your problem", -2),
            option(Label::B, "Offer surface-level support if they ask", 0),
            option(Label::C, "Proactively check in and offer help", 2),
            option(Label::D, "Wait for them to explicitly ask for help", 0),
        ],
    },
    Question {
        id: 10,
        prompt: "When building relationships, you naturally:",
        example_hint: Some("Example: New colleague, neighbor, or acquaintance"),
        options: [
            option(Label::A, "Keep everyone at a safe distance emotionally", -2),
            option(Label::B, "Share gradually and carefully monitor reactions", -1),
            option(Label::C, "Build connections through genuine, open communication", 2),
            option(Label::D, "Maintain friendliness but avoid real emotional depth", -1),
        ],
    },
];
