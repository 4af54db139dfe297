//! Shared domain types for the vaccination registry.
//!
//! These types are the read-only snapshot the eligibility engine works on. They are built by
//! whoever loads registry data (see the `vax-records` crate) and are never mutated by the engine.

mod administration;
mod patient;
mod vaccine;

pub use administration::Administration;
pub use patient::{Patient, Sex};
pub use vaccine::{TargetGroup, Vaccine, VaccineError, VaccineKind};

/// Rejection reasons for [`NonEmptyText`].
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("blank text is not allowed here")]
    Empty,
}

/// Display text that is never blank once surrounding whitespace is stripped.
///
/// Vaccine names appear as badges on the vaccination card, so a catalogue entry named `"  "`
/// is refused when it is loaded rather than rendered as an empty badge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Strip surrounding whitespace and keep the rest.
    ///
    /// # Errors
    ///
    /// [`TextError::Empty`] when only whitespace was given.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        match input.as_ref().trim() {
            "" => Err(TextError::Empty),
            text => Ok(Self(text.to_owned())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for NonEmptyText {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

/// Registry identity of a patient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PatientId(pub u64);

/// Registry identity of a vaccine in the catalogue.
///
/// Administration records point at vaccines through this id, so dose counting never depends on
/// the display name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct VaccineId(pub u64);

impl std::fmt::Display for PatientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::fmt::Display for VaccineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}
