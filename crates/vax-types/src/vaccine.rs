use crate::{NonEmptyText, VaccineId};
use serde::{Deserialize, Serialize};

/// Errors raised when a vaccine definition breaks a catalogue invariant.
#[derive(Debug, thiserror::Error)]
pub enum VaccineError {
    #[error("vaccine {0} must have at least one dose in its scheme")]
    EmptyScheme(NonEmptyText),
}

/// Demographic group a vaccine is primarily intended for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetGroup {
    #[serde(alias = "crianca")]
    Child,
    #[serde(alias = "mif")]
    FertileAgeWoman,
    #[serde(alias = "gravida")]
    PregnantWoman,
    #[serde(alias = "puerpera")]
    PostpartumWoman,
    #[serde(alias = "adulto")]
    Adult,
    #[serde(alias = "hpv")]
    HpvEligible,
}

impl TargetGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetGroup::Child => "child",
            TargetGroup::FertileAgeWoman => "fertile_age_woman",
            TargetGroup::PregnantWoman => "pregnant_woman",
            TargetGroup::PostpartumWoman => "postpartum_woman",
            TargetGroup::Adult => "adult",
            TargetGroup::HpvEligible => "hpv_eligible",
        }
    }
}

impl std::fmt::Display for TargetGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Stable rule-dispatch tag for a vaccine.
///
/// The eligibility rules are keyed on this tag, never on the display name. The tag is attached
/// once when the catalogue is loaded, either explicitly or via [`VaccineKind::classify`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VaccineKind {
    /// BCG, single dose before the first birthday.
    Bcg,
    /// Hepatitis B birth dose.
    HepatitisBBirth,
    /// Oral polio birth dose.
    PolioBirth,
    Rotavirus,
    Pentavalent,
    Pneumococcal,
    Hpv,
    TetanusToxoid,
    /// Vitamin A supplement for recently delivered women.
    VitaminA,
    /// Anything without a dedicated rule; only the target-group ceiling applies.
    Other,
}

impl VaccineKind {
    /// Derive the kind from a legacy catalogue display name.
    ///
    /// Matching is case-sensitive. Birth doses and the single-product vaccines need an exact
    /// name; the multi-dose families are recognised by substring (`"Penta 2"`, `"Rotavirus 1"`).
    pub fn classify(name: &str) -> Self {
        match name {
            "BCG" => return VaccineKind::Bcg,
            "HepB0" => return VaccineKind::HepatitisBBirth,
            "Polio 0" => return VaccineKind::PolioBirth,
            _ => {}
        }

        if name.contains("Rotavirus") {
            return VaccineKind::Rotavirus;
        }
        if name.contains("Penta") {
            return VaccineKind::Pentavalent;
        }
        if name.contains("Pneumo") {
            return VaccineKind::Pneumococcal;
        }

        match name {
            "HPV" => VaccineKind::Hpv,
            "Toxoide Td" => VaccineKind::TetanusToxoid,
            "Vitamina A" => VaccineKind::VitaminA,
            _ => VaccineKind::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VaccineKind::Bcg => "bcg",
            VaccineKind::HepatitisBBirth => "hepatitis_b_birth",
            VaccineKind::PolioBirth => "polio_birth",
            VaccineKind::Rotavirus => "rotavirus",
            VaccineKind::Pentavalent => "pentavalent",
            VaccineKind::Pneumococcal => "pneumococcal",
            VaccineKind::Hpv => "hpv",
            VaccineKind::TetanusToxoid => "tetanus_toxoid",
            VaccineKind::VitaminA => "vitamin_a",
            VaccineKind::Other => "other",
        }
    }
}

impl std::fmt::Display for VaccineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// A catalogue vaccine definition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vaccine {
    id: VaccineId,
    name: NonEmptyText,
    kind: VaccineKind,
    target_group: TargetGroup,
    total_doses: u32,
    doses_per_vial: u32,
    usable_hours: u32,
}

impl Vaccine {
    /// Create a vaccine definition.
    ///
    /// Vial size and usable hours default to a single-dose vial with no open-vial window; use
    /// [`Vaccine::with_vial`] to set them.
    ///
    /// # Errors
    ///
    /// Returns [`VaccineError::EmptyScheme`] if `total_doses` is zero.
    pub fn new(
        id: VaccineId,
        name: NonEmptyText,
        kind: VaccineKind,
        target_group: TargetGroup,
        total_doses: u32,
    ) -> Result<Self, VaccineError> {
        if total_doses == 0 {
            return Err(VaccineError::EmptyScheme(name));
        }

        Ok(Self {
            id,
            name,
            kind,
            target_group,
            total_doses,
            doses_per_vial: 1,
            usable_hours: 0,
        })
    }

    /// Set the inventory attributes. These never influence eligibility.
    pub fn with_vial(mut self, doses_per_vial: u32, usable_hours: u32) -> Self {
        self.doses_per_vial = doses_per_vial;
        self.usable_hours = usable_hours;
        self
    }

    pub fn id(&self) -> VaccineId {
        self.id
    }

    pub fn name(&self) -> &NonEmptyText {
        &self.name
    }

    pub fn kind(&self) -> VaccineKind {
        self.kind
    }

    pub fn target_group(&self) -> TargetGroup {
        self.target_group
    }

    /// Number of doses that make up the full scheme. Always at least one.
    pub fn total_doses(&self) -> u32 {
        self.total_doses
    }

    pub fn doses_per_vial(&self) -> u32 {
        self.doses_per_vial
    }

    /// Hours a vial stays usable once opened.
    pub fn usable_hours(&self) -> u32 {
        self.usable_hours
    }
}
