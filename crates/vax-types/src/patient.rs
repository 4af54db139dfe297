use crate::PatientId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Biological sex as recorded at registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    #[serde(alias = "M")]
    Male,
    #[serde(alias = "F")]
    Female,
}

/// A registered patient, as seen by the eligibility engine.
///
/// Locality, guardian contact and identification number are carried for display only; no rule
/// reads them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub sex: Sex,
    pub pregnant: bool,
    pub fertile_age_woman: bool,
    pub postpartum: bool,
    /// Only meaningful while `postpartum` is set.
    pub delivery_date: Option<NaiveDate>,
    pub locality: Option<String>,
    pub guardian_contact: Option<String>,
    pub identification_number: Option<String>,
}

impl Patient {
    /// Create a patient with no clinical flags set.
    pub fn new(id: PatientId, name: impl Into<String>, date_of_birth: NaiveDate, sex: Sex) -> Self {
        Self {
            id,
            name: name.into(),
            date_of_birth,
            sex,
            pregnant: false,
            fertile_age_woman: false,
            postpartum: false,
            delivery_date: None,
            locality: None,
            guardian_contact: None,
            identification_number: None,
        }
    }

    /// Mark the patient as postpartum, optionally with the delivery date.
    pub fn with_delivery(mut self, delivery_date: Option<NaiveDate>) -> Self {
        self.postpartum = true;
        self.delivery_date = delivery_date;
        self
    }

    /// The delivery date to measure postpartum intervals from.
    ///
    /// A stale delivery date on a patient who is no longer postpartum is ignored.
    pub fn delivery_anchor(&self) -> Option<NaiveDate> {
        if self.postpartum {
            self.delivery_date
        } else {
            None
        }
    }

    pub fn is_female(&self) -> bool {
        self.sex == Sex::Female
    }
}
