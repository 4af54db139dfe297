//! Per-patient vaccination card.
//!
//! Evaluates every catalogue vaccine for one patient, in catalogue order, the way the clinic
//! screens list them.

use crate::age::AgeBreakdown;
use crate::eligibility::{doses_taken, evaluate, Status, Verdict};
use chrono::NaiveDate;
use serde::Serialize;
use vax_types::{Administration, NonEmptyText, Patient, PatientId, Vaccine, VaccineId};

/// One line of a vaccination card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CardEntry {
    pub vaccine_id: VaccineId,
    pub vaccine: NonEmptyText,
    pub doses_taken: u32,
    pub total_doses: u32,
    pub verdict: Verdict,
}

/// Counts of card entries by status.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CardSummary {
    pub due: usize,
    pub complete: usize,
    pub blocked: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VaccinationCard {
    pub patient_id: PatientId,
    pub as_of: NaiveDate,
    pub age: AgeBreakdown,
    pub entries: Vec<CardEntry>,
}

impl VaccinationCard {
    /// Build the card for `patient` against `catalog` as of `today`.
    pub fn build(
        patient: &Patient,
        catalog: &[Vaccine],
        history: &[Administration],
        today: NaiveDate,
    ) -> Self {
        let entries = catalog
            .iter()
            .map(|vaccine| CardEntry {
                vaccine_id: vaccine.id(),
                vaccine: vaccine.name().clone(),
                doses_taken: doses_taken(vaccine, history),
                total_doses: vaccine.total_doses(),
                verdict: evaluate(patient, vaccine, history, today),
            })
            .collect();

        Self {
            patient_id: patient.id,
            as_of: today,
            age: AgeBreakdown::between(patient.date_of_birth, today),
            entries,
        }
    }

    pub fn summary(&self) -> CardSummary {
        self.entries
            .iter()
            .fold(CardSummary::default(), |mut acc, entry| {
                match entry.verdict.status {
                    Status::Due => acc.due += 1,
                    Status::Complete => acc.complete += 1,
                    Status::Blocked => acc.blocked += 1,
                }
                acc
            })
    }

    /// Entries whose next dose may be given now.
    pub fn due(&self) -> impl Iterator<Item = &CardEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.verdict.is_administrable())
    }

    pub fn entry(&self, vaccine_id: VaccineId) -> Option<&CardEntry> {
        self.entries.iter().find(|entry| entry.vaccine_id == vaccine_id)
    }
}
