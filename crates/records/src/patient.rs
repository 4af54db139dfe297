//! Patient snapshots.
//!
//! ```yaml
//! id: 12
//! name: Ana Mondlane
//! date_of_birth: 2024-03-01
//! sex: F
//! postpartum: false
//! ```

use crate::{parse_wire, read_snapshot, RecordsError, RecordsResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use vax_types::{Patient, PatientId, Sex};

/// Patient snapshot operations.
pub struct PatientRecord;

impl PatientRecord {
    /// Parse a patient from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`RecordsError`] if the YAML does not match the patient schema, or if the
    /// delivery date precedes the date of birth.
    pub fn parse(yaml_text: &str) -> RecordsResult<Patient> {
        let wire: PatientWire = parse_wire(yaml_text, "Patient")?;

        if let Some(delivery) = wire.delivery_date {
            if delivery < wire.date_of_birth {
                return Err(RecordsError::InvalidInput(format!(
                    "patient {}: delivery date {delivery} precedes date of birth {}",
                    wire.id, wire.date_of_birth
                )));
            }
            if !wire.postpartum {
                tracing::warn!(
                    "patient {} has a delivery date but is not postpartum; it will be ignored",
                    wire.id
                );
            }
        }

        Ok(wire_to_domain(wire))
    }

    pub fn render(patient: &Patient) -> RecordsResult<String> {
        serde_yaml::to_string(&domain_to_wire(patient))
            .map_err(|e| RecordsError::Translation(format!("Failed to serialise patient: {e}")))
    }

    /// Read and parse a patient file.
    pub fn load(path: &Path) -> RecordsResult<Patient> {
        Self::parse(&read_snapshot(path)?)
    }

    /// Check the patient's dates against the clinic's current date.
    ///
    /// Ages are only defined for anchors that are not in the future, so callers should run
    /// this before evaluating.
    ///
    /// # Errors
    ///
    /// Returns [`RecordsError::InvalidInput`] if the date of birth or delivery date is after
    /// `today`.
    pub fn check_dates(patient: &Patient, today: NaiveDate) -> RecordsResult<()> {
        if patient.date_of_birth > today {
            return Err(RecordsError::InvalidInput(format!(
                "patient {}: date of birth {} is after {today}",
                patient.id, patient.date_of_birth
            )));
        }
        if let Some(delivery) = patient.delivery_date.filter(|d| *d > today) {
            return Err(RecordsError::InvalidInput(format!(
                "patient {}: delivery date {delivery} is after {today}",
                patient.id
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct PatientWire {
    id: u64,
    name: String,
    date_of_birth: NaiveDate,
    sex: Sex,
    #[serde(default)]
    pregnant: bool,
    #[serde(default)]
    fertile_age_woman: bool,
    #[serde(default)]
    postpartum: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    delivery_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    locality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    guardian_contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    identification_number: Option<String>,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn wire_to_domain(wire: PatientWire) -> Patient {
    Patient {
        id: PatientId(wire.id),
        name: wire.name,
        date_of_birth: wire.date_of_birth,
        sex: wire.sex,
        pregnant: wire.pregnant,
        fertile_age_woman: wire.fertile_age_woman,
        postpartum: wire.postpartum,
        delivery_date: wire.delivery_date,
        locality: wire.locality,
        guardian_contact: wire.guardian_contact,
        identification_number: wire.identification_number,
    }
}

fn domain_to_wire(patient: &Patient) -> PatientWire {
    PatientWire {
        id: patient.id.0,
        name: patient.name.clone(),
        date_of_birth: patient.date_of_birth,
        sex: patient.sex,
        pregnant: patient.pregnant,
        fertile_age_woman: patient.fertile_age_woman,
        postpartum: patient.postpartum,
        delivery_date: patient.delivery_date,
        locality: patient.locality.clone(),
        guardian_contact: patient.guardian_contact.clone(),
        identification_number: patient.identification_number.clone(),
    }
}
