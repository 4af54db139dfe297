//! Administration history snapshots.
//!
//! ```yaml
//! administrations:
//!   - patient_id: 12
//!     vaccine_id: 1
//!     dose_number: 1
//!     date: 2024-03-01
//!     responsible: Enfermeiro de Turno
//! ```

use crate::{parse_wire, read_snapshot, RecordsError, RecordsResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use vax_types::{Administration, PatientId, VaccineId};

/// Administration history operations.
pub struct AdministrationHistory;

impl AdministrationHistory {
    /// Parse an administration history from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`RecordsError`] if the YAML does not match the history schema or a dose number
    /// is zero.
    pub fn parse(yaml_text: &str) -> RecordsResult<Vec<Administration>> {
        let wire: HistoryWire = parse_wire(yaml_text, "History")?;
        wire.administrations
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                if record.dose_number == 0 {
                    return Err(RecordsError::InvalidInput(format!(
                        "administrations[{index}]: dose numbers start at 1"
                    )));
                }
                Ok(wire_to_domain(record))
            })
            .collect()
    }

    pub fn render(history: &[Administration]) -> RecordsResult<String> {
        let wire = HistoryWire {
            administrations: history.iter().map(domain_to_wire).collect(),
        };
        serde_yaml::to_string(&wire)
            .map_err(|e| RecordsError::Translation(format!("Failed to serialise history: {e}")))
    }

    /// Read and parse a history file.
    pub fn load(path: &Path) -> RecordsResult<Vec<Administration>> {
        Self::parse(&read_snapshot(path)?)
    }

    /// Keep only the records belonging to `patient_id`.
    ///
    /// History files exported from the registry may cover several patients; the evaluator
    /// counts every record it is given, so filter before evaluating.
    pub fn for_patient(history: Vec<Administration>, patient_id: PatientId) -> Vec<Administration> {
        history
            .into_iter()
            .filter(|record| record.patient_id == patient_id)
            .collect()
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct HistoryWire {
    #[serde(default)]
    administrations: Vec<AdministrationWire>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct AdministrationWire {
    patient_id: u64,
    vaccine_id: u64,
    dose_number: u32,
    date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    responsible: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn wire_to_domain(wire: AdministrationWire) -> Administration {
    Administration {
        patient_id: PatientId(wire.patient_id),
        vaccine_id: VaccineId(wire.vaccine_id),
        dose_number: wire.dose_number,
        date: wire.date,
        responsible: wire.responsible,
        notes: wire.notes,
    }
}

fn domain_to_wire(record: &Administration) -> AdministrationWire {
    AdministrationWire {
        patient_id: record.patient_id.0,
        vaccine_id: record.vaccine_id.0,
        dose_number: record.dose_number,
        date: record.date,
        responsible: record.responsible.clone(),
        notes: record.notes.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"administrations:
  - patient_id: 12
    vaccine_id: 1
    dose_number: 1
    date: 2024-03-01
    responsible: Enfermeiro de Turno
  - patient_id: 12
    vaccine_id: 2
    dose_number: 1
    date: 2024-03-01
  - patient_id: 30
    vaccine_id: 1
    dose_number: 1
    date: 2024-04-11
    notes: reacção ligeira
"#;

    #[test]
    fn parses_history() {
        let history = AdministrationHistory::parse(SAMPLE).expect("parse history");
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].vaccine_id, VaccineId(1));
        assert_eq!(history[0].responsible.as_deref(), Some("Enfermeiro de Turno"));
        assert_eq!(history[2].notes.as_deref(), Some("reacção ligeira"));
    }

    #[test]
    fn empty_document_is_empty_history() {
        let history = AdministrationHistory::parse("administrations: []\n").expect("parse");
        assert!(history.is_empty());
        let history = AdministrationHistory::parse("{}").expect("parse");
        assert!(history.is_empty());
    }

    #[test]
    fn filters_by_patient() {
        let history = AdministrationHistory::parse(SAMPLE).expect("parse history");
        let mine = AdministrationHistory::for_patient(history, PatientId(12));
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|r| r.patient_id == PatientId(12)));
    }

    #[test]
    fn round_trips() {
        let history = AdministrationHistory::parse(SAMPLE).expect("parse history");
        let output = AdministrationHistory::render(&history).expect("render history");
        let reparsed = AdministrationHistory::parse(&output).expect("reparse history");
        assert_eq!(history, reparsed);
    }

    #[test]
    fn rejects_dose_zero() {
        let input = r#"administrations:
  - patient_id: 1
    vaccine_id: 1
    dose_number: 0
    date: 2024-03-01
"#;
        let err = AdministrationHistory::parse(input).expect_err("should reject dose 0");
        assert!(err.to_string().contains("administrations[0]"));
    }

    #[test]
    fn rejects_misspelt_field() {
        let input = r#"administrations:
  - patient_id: 1
    vacina_id: 1
    dose_number: 1
    date: 2024-03-01
"#;
        let err = AdministrationHistory::parse(input).expect_err("should reject field");
        assert!(matches!(err, RecordsError::Translation(msg) if msg.contains("vacina_id")));
    }
}
