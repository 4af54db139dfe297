use crate::{PatientId, VaccineId};
use chrono::NaiveDate;

/// One recorded dose given to a patient.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Administration {
    pub patient_id: PatientId,
    pub vaccine_id: VaccineId,
    /// Sequence number of the dose within the vaccine's scheme, starting at 1.
    pub dose_number: u32,
    pub date: NaiveDate,
    pub responsible: Option<String>,
    pub notes: Option<String>,
}

impl Administration {
    pub fn new(
        patient_id: PatientId,
        vaccine_id: VaccineId,
        dose_number: u32,
        date: NaiveDate,
    ) -> Self {
        Self {
            patient_id,
            vaccine_id,
            dose_number,
            date,
            responsible: None,
            notes: None,
        }
    }
}
