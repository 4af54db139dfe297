//! # Vax Core
//!
//! Vaccine eligibility and dose scheduling for the clinic registry.
//!
//! This crate contains pure decision logic only:
//! - calendar-aware age/interval arithmetic ([`age`])
//! - the ordered eligibility rule chain ([`eligibility`])
//! - helpers built on top of it: per-patient vaccination cards ([`card`]) and administration
//!   planning ([`administration`])
//! - the reference vaccine catalogue the clinic starts from ([`catalog`])
//!
//! **No storage or transport concerns**: callers load patients, vaccines and history (see the
//! `vax-records` crate) and pass in the clinic's current date explicitly. Nothing here reads the
//! system clock, the environment or the filesystem.

pub mod administration;
pub mod age;
pub mod card;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod eligibility;
pub mod error;

pub use administration::{plan_administration, DosePlan};
pub use age::AgeBreakdown;
pub use card::{CardEntry, CardSummary, VaccinationCard};
pub use catalog::reference_catalog;
pub use config::CoreConfig;
pub use eligibility::{doses_taken, evaluate, Status, Verdict};
pub use error::{EligibilityError, EligibilityResult};

pub use vax_types::{
    Administration, NonEmptyText, Patient, PatientId, Sex, TargetGroup, Vaccine, VaccineId,
    VaccineKind,
};
