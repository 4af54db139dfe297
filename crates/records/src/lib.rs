//! Snapshot formats for the vaccination registry.
//!
//! This crate provides **wire models** and **translation helpers** for the YAML snapshots the
//! eligibility engine is fed from:
//! - the vaccine catalogue
//! - a single patient
//! - a patient's administration history
//!
//! This crate focuses on:
//! - strict serialisation/deserialisation (`deny_unknown_fields`, typed dates)
//! - translation between wire structs and `vax-types` domain types
//! - attaching the rule-dispatch [`VaccineKind`](vax_types::VaccineKind) to every vaccine at
//!   load time
//!
//! It does not own storage: callers decide where snapshots come from.

pub mod catalog;
pub mod history;
pub mod patient;

pub use catalog::VaccineCatalog;
pub use history::AdministrationHistory;
pub use patient::PatientRecord;

use serde::de::DeserializeOwned;
use std::path::Path;

/// Errors returned by the `vax-records` crate.
#[derive(Debug, thiserror::Error)]
pub enum RecordsError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`RecordsError`].
pub type RecordsResult<T> = Result<T, RecordsError>;

/// Deserialise `yaml_text` into a wire struct, reporting the failing field path.
fn parse_wire<T: DeserializeOwned>(yaml_text: &str, what: &str) -> RecordsResult<T> {
    let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

    serde_path_to_error::deserialize::<_, T>(deserializer).map_err(|err| {
        let path = err.path().to_string();
        let source = err.into_inner();
        let path = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        RecordsError::Translation(format!("{what} schema mismatch at {path}: {source}"))
    })
}

fn read_snapshot(path: &Path) -> RecordsResult<String> {
    tracing::debug!("reading snapshot {}", path.display());
    Ok(std::fs::read_to_string(path)?)
}
