use std::io::Write;

use serde::Serialize;

use super::domain::Label;
use super::repository::SurveyResponseRecord;

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    response_id: &'a str,
    participant_id: &'a str,
    submitted_at: String,
    classification: &'static str,
    confidence_band: &'static str,
    total_score: i32,
    count_a: u8,
    count_b: u8,
    count_c: u8,
    count_d: u8,
}

impl<'a> From<&'a SurveyResponseRecord> for ExportRow<'a> {
    fn from(record: &'a SurveyResponseRecord) -> Self {
        let tally = &record.result.tally;
        Self {
            response_id: &record.response_id.0,
            participant_id: &record.participant_id.0,
            submitted_at: record.submitted_at.to_rfc3339(),
            classification: record.classification().label(),
            confidence_band: record.confidence_band().label(),
            total_score: tally.total_score,
            count_a: tally.count(Label::A),
            count_b: tally.count(Label::B),
            count_c: tally.count(Label::C),
            count_d: tally.count(Label::D),
        }
    }
}

pub const EXPORT_HEADER: [&str; 10] = [
    "response_id",
    "participant_id",
    "submitted_at",
    "classification",
    "confidence_band",
    "total_score",
    "count_a",
    "count_b",
    "count_c",
    "count_d",
];

/// Writes one CSV row per stored response. The header is written even when empty.
pub fn write_responses_csv<W: Write>(
    writer: W,
    records: &[SurveyResponseRecord],
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(EXPORT_HEADER)?;
    for record in records {
        csv_writer.serialize(ExportRow::from(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}
