//! Vaccine catalogue snapshots.
//!
//! ```yaml
//! vaccines:
//!   - id: 1
//!     name: BCG
//!     doses_per_vial: 20
//!     usable_hours: 6
//!     target_group: crianca
//!     total_doses: 1
//! ```
//!
//! `kind` may be given explicitly; when it is absent the kind is classified from the name.

use crate::{parse_wire, read_snapshot, RecordsError, RecordsResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use vax_types::{NonEmptyText, TargetGroup, Vaccine, VaccineId, VaccineKind};

/// Vaccine catalogue operations.
///
/// This is a zero-sized type used for namespacing catalogue operations.
pub struct VaccineCatalog;

impl VaccineCatalog {
    /// Parse a catalogue from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`RecordsError`] if:
    /// - the YAML does not match the catalogue schema (unknown keys included),
    /// - a vaccine name is blank or a scheme has zero doses,
    /// - two vaccines share an id.
    pub fn parse(yaml_text: &str) -> RecordsResult<Vec<Vaccine>> {
        let wire: CatalogWire = parse_wire(yaml_text, "Catalogue")?;

        let mut seen = HashSet::new();
        let mut vaccines = Vec::with_capacity(wire.vaccines.len());
        for entry in wire.vaccines {
            if !seen.insert(entry.id) {
                return Err(RecordsError::InvalidInput(format!(
                    "duplicate vaccine id {}",
                    entry.id
                )));
            }
            vaccines.push(wire_to_domain(entry)?);
        }

        Ok(vaccines)
    }

    /// Render a catalogue as YAML text, always including each vaccine's kind.
    ///
    /// # Errors
    ///
    /// Returns [`RecordsError`] if serialisation fails.
    pub fn render(vaccines: &[Vaccine]) -> RecordsResult<String> {
        let wire = CatalogWire {
            vaccines: vaccines.iter().map(domain_to_wire).collect(),
        };
        serde_yaml::to_string(&wire)
            .map_err(|e| RecordsError::Translation(format!("Failed to serialise catalogue: {e}")))
    }

    /// Read and parse a catalogue file.
    pub fn load(path: &Path) -> RecordsResult<Vec<Vaccine>> {
        let vaccines = Self::parse(&read_snapshot(path)?)?;
        tracing::debug!("loaded {} vaccines from {}", vaccines.len(), path.display());
        Ok(vaccines)
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct CatalogWire {
    #[serde(default)]
    vaccines: Vec<VaccineWire>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
struct VaccineWire {
    id: u64,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kind: Option<VaccineKind>,
    #[serde(default = "default_doses_per_vial")]
    doses_per_vial: u32,
    #[serde(default)]
    usable_hours: u32,
    target_group: TargetGroup,
    total_doses: u32,
}

fn default_doses_per_vial() -> u32 {
    1
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn wire_to_domain(wire: VaccineWire) -> RecordsResult<Vaccine> {
    let name = NonEmptyText::new(&wire.name).map_err(|e| {
        RecordsError::InvalidInput(format!("vaccine {}: name: {e}", wire.id))
    })?;
    let kind = wire
        .kind
        .unwrap_or_else(|| VaccineKind::classify(name.as_str()));

    let vaccine = Vaccine::new(
        VaccineId(wire.id),
        name,
        kind,
        wire.target_group,
        wire.total_doses,
    )
    .map_err(|e| RecordsError::InvalidInput(e.to_string()))?;

    Ok(vaccine.with_vial(wire.doses_per_vial, wire.usable_hours))
}

fn domain_to_wire(vaccine: &Vaccine) -> VaccineWire {
    VaccineWire {
        id: vaccine.id().0,
        name: vaccine.name().to_string(),
        kind: Some(vaccine.kind()),
        doses_per_vial: vaccine.doses_per_vial(),
        usable_hours: vaccine.usable_hours(),
        target_group: vaccine.target_group(),
        total_doses: vaccine.total_doses(),
    }
}
