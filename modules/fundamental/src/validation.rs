//! Field validation, applied before anything gets written.
//!
//! The functions are pure. Checks which need the database (existence of referenced rows) are
//! performed by the services, reporting through the same [`ValidationError`].

use std::str::FromStr;
use superheroes_entity::{power::MIN_DESCRIPTION_LENGTH, strength::Strength};

/// The reason a write got rejected.
///
/// The reason gets logged, but is not reported to the client.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing value for '{0}'")]
    Missing(&'static str),
    #[error("description must be at least {MIN_DESCRIPTION_LENGTH} characters long, was {0}")]
    DescriptionTooShort(usize),
    #[error("unknown strength: '{0}'")]
    UnknownStrength(String),
    #[error("{0} {1} does not exist")]
    UnknownReference(&'static str, i32),
    #[error("malformed request: {0}")]
    Malformed(String),
    #[error("constraint violation: {0}")]
    Constraint(String),
}

/// Validate the description of a power.
///
/// Length is counted in characters, not bytes.
pub fn validate_description(description: Option<&str>) -> Result<String, ValidationError> {
    let description = description.ok_or(ValidationError::Missing("description"))?;

    match description.chars().count() {
        len if len < MIN_DESCRIPTION_LENGTH => Err(ValidationError::DescriptionTooShort(len)),
        _ => Ok(description.to_string()),
    }
}

/// Validate the strength of a hero power. Matching is case-sensitive.
pub fn validate_strength(strength: Option<&str>) -> Result<Strength, ValidationError> {
    let strength = strength.ok_or(ValidationError::Missing("strength"))?;
    Strength::from_str(strength).map_err(|_| ValidationError::UnknownStrength(strength.to_string()))
}

/// Validate the presence of a reference to another record.
pub fn validate_reference(field: &'static str, id: Option<i32>) -> Result<i32, ValidationError> {
    id.ok_or(ValidationError::Missing(field))
}
