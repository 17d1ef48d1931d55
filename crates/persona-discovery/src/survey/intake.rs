use chrono::{DateTime, Utc};

use super::domain::{Participant, ParticipantId, ParticipantRegistration};

/// Validation errors raised while registering a participant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("participant name is required")]
    MissingName,
    #[error("age must be between {min} and {max} (found {age})", min = MIN_AGE, max = MAX_AGE)]
    AgeOutOfRange { age: u32 },
    #[error("email address '{0}' is not valid")]
    InvalidEmail(String),
}

pub const MIN_AGE: u32 = 5;
pub const MAX_AGE: u32 = 100;

/// Guard responsible for producing normalized [`Participant`] records.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    pub fn participant_from_registration(
        &self,
        registration: ParticipantRegistration,
        participant_id: ParticipantId,
        registered_at: DateTime<Utc>,
    ) -> Result<Participant, IntakeViolation> {
        let name = registration.name.trim();
        if name.is_empty() {
            return Err(IntakeViolation::MissingName);
        }

        let age = u8::try_from(registration.age)
            .ok()
            .filter(|_| (MIN_AGE..=MAX_AGE).contains(&registration.age))
            .ok_or(IntakeViolation::AgeOutOfRange {
                age: registration.age,
            })?;

        let email = normalize_email(&registration.email)?;

        Ok(Participant {
            participant_id,
            name: name.to_string(),
            age,
            profession: registration.profession,
            email,
            registered_at,
        })
    }
}

/// Accepts `local@domain.tld` shapes and lowercases them.
fn normalize_email(raw: &str) -> Result<String, IntakeViolation> {
    let candidate = raw.trim();
    let invalid = || IntakeViolation::InvalidEmail(raw.to_string());

    if candidate.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let mut parts = candidate.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return Err(invalid()),
    };

    let (host, tld) = domain.rsplit_once('.').ok_or_else(invalid)?;
    if local.is_empty() || host.is_empty() || tld.is_empty() {
        return Err(invalid());
    }

    Ok(candidate.to_lowercase())
}
