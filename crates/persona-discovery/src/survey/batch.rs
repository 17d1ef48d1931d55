use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use super::domain::ResponseSheet;
use super::engine::{ClassificationEngine, ClassificationError, ClassificationResult};

#[derive(Debug)]
pub enum BatchImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for BatchImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchImportError::Io(err) => write!(f, "failed to read answer sheet file: {}", err),
            BatchImportError::Csv(err) => write!(f, "invalid answer sheet CSV data: {}", err),
        }
    }
}

impl std::error::Error for BatchImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchImportError::Io(err) => Some(err),
            BatchImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for BatchImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for BatchImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Result for a single CSV row. `row` counts data rows from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub row: usize,
    pub respondent: Option<String>,
    pub outcome: Result<ClassificationResult, ClassificationError>,
}

/// Classifies every row of an answer-sheet CSV; a bad row never aborts the batch.
pub struct BatchClassifier;

impl BatchClassifier {
    pub fn from_path<P: AsRef<Path>>(
        engine: &ClassificationEngine,
        path: P,
    ) -> Result<Vec<BatchOutcome>, BatchImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(engine, file)
    }

    pub fn from_reader<R: Read>(
        engine: &ClassificationEngine,
        reader: R,
    ) -> Result<Vec<BatchOutcome>, BatchImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let layout = ColumnLayout::from_headers(csv_reader.headers()?);

        let mut outcomes = Vec::new();
        for (idx, record) in csv_reader.records().enumerate() {
            let record = record?;
            outcomes.push(BatchOutcome {
                row: idx + 1,
                respondent: layout.respondent(&record),
                outcome: engine.classify(&layout.sheet(&record)),
            });
        }

        Ok(outcomes)
    }
}

struct ColumnLayout {
    respondent: Option<usize>,
    questions: Vec<(usize, u32)>,
}

impl ColumnLayout {
    fn from_headers(headers: &StringRecord) -> Self {
        let mut respondent = None;
        let mut questions = Vec::new();

        for (idx, header) in headers.iter().enumerate() {
            let normalized = header.trim().trim_start_matches('\u{feff}').to_ascii_lowercase();
            if normalized == "respondent" {
                respondent = Some(idx);
            } else if let Some(question_id) = question_id_for(&normalized) {
                questions.push((idx, question_id));
            }
        }

        Self {
            respondent,
            questions,
        }
    }

    fn respondent(&self, record: &StringRecord) -> Option<String> {
        self.respondent
            .and_then(|idx| record.get(idx))
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    /// Blank cells are left out so they surface as unanswered questions.
    fn sheet(&self, record: &StringRecord) -> ResponseSheet {
        let answers: BTreeMap<u32, String> = self
            .questions
            .iter()
            .filter_map(|(idx, question_id)| {
                record
                    .get(*idx)
                    .filter(|value| !value.is_empty())
                    .map(|value| (*question_id, value.to_string()))
            })
            .collect();
        ResponseSheet::new(answers)
    }
}

/// `q7`, `Q7`, and `7` all name question 7.
fn question_id_for(header: &str) -> Option<u32> {
    header.strip_prefix('q').unwrap_or(header).parse().ok()
}
