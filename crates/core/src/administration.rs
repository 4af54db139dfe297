//! Administration planning.
//!
//! Recording a dose is gated on two independent checks: vial stock, which belongs to the
//! inventory side of the registry, and eligibility, which is checked here. A plan is only
//! produced for a due dose and carries the sequence number the new record should get.

use crate::eligibility::{doses_taken, evaluate};
use crate::{EligibilityError, EligibilityResult};
use chrono::NaiveDate;
use serde::Serialize;
use vax_types::{Administration, Patient, Vaccine, VaccineId};

/// The dose a caller may record next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DosePlan {
    pub vaccine_id: VaccineId,
    /// One more than the doses already recorded for this vaccine.
    pub dose_number: u32,
}

/// Check that the next dose of `vaccine` may be given today and number it.
///
/// # Errors
///
/// Returns [`EligibilityError::NotAdministrable`] with the verdict's status and label when the
/// scheme is complete or the dose is blocked.
pub fn plan_administration(
    patient: &Patient,
    vaccine: &Vaccine,
    history: &[Administration],
    today: NaiveDate,
) -> EligibilityResult<DosePlan> {
    let verdict = evaluate(patient, vaccine, history, today);
    if !verdict.is_administrable() {
        return Err(EligibilityError::NotAdministrable {
            vaccine: vaccine.name().clone(),
            status: verdict.status,
            label: verdict.label,
        });
    }

    Ok(DosePlan {
        vaccine_id: vaccine.id(),
        dose_number: doses_taken(vaccine, history).saturating_add(1),
    })
}
