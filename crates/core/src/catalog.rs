//! Reference vaccine catalogue.
//!
//! The national schedule the registry is seeded with. Clinics may load their own catalogue
//! instead; this one is used when none is supplied.

use vax_types::{NonEmptyText, TargetGroup, Vaccine, VaccineId, VaccineKind};

struct CatalogEntry {
    name: &'static str,
    doses_per_vial: u32,
    usable_hours: u32,
    target_group: TargetGroup,
    total_doses: u32,
}

const fn entry(
    name: &'static str,
    doses_per_vial: u32,
    usable_hours: u32,
    target_group: TargetGroup,
    total_doses: u32,
) -> CatalogEntry {
    CatalogEntry {
        name,
        doses_per_vial,
        usable_hours,
        target_group,
        total_doses,
    }
}

const REFERENCE: [CatalogEntry; 19] = [
    entry("BCG", 20, 6, TargetGroup::Child, 1),
    entry("HepB0", 1, 24, TargetGroup::Child, 1),
    entry("Polio 0", 20, 72, TargetGroup::Child, 1),
    entry("Polio 1", 20, 72, TargetGroup::Child, 1),
    entry("Polio 2", 20, 72, TargetGroup::Child, 1),
    entry("Polio 3", 20, 72, TargetGroup::Child, 1),
    entry("Penta 1", 10, 168, TargetGroup::Child, 1),
    entry("Penta 2", 10, 168, TargetGroup::Child, 1),
    entry("Penta 3", 10, 168, TargetGroup::Child, 1),
    entry("Pneumo 1", 1, 168, TargetGroup::Child, 1),
    entry("Pneumo 2", 1, 168, TargetGroup::Child, 1),
    entry("Pneumo 3", 1, 168, TargetGroup::Child, 1),
    entry("Rotavirus 1", 1, 24, TargetGroup::Child, 1),
    entry("Rotavirus 2", 1, 24, TargetGroup::Child, 1),
    entry("Sarampo-Rubeola 1", 10, 6, TargetGroup::Child, 1),
    entry("Sarampo-Rubeola 2", 10, 6, TargetGroup::Child, 1),
    entry("HPV", 1, 168, TargetGroup::HpvEligible, 2),
    entry("Toxoide Td", 10, 168, TargetGroup::FertileAgeWoman, 5),
    entry("Vitamina A", 1, 24, TargetGroup::PostpartumWoman, 1),
];

/// The reference catalogue, with ids `1..=19` in schedule order and kinds classified from
/// the names.
pub fn reference_catalog() -> Vec<Vaccine> {
    REFERENCE
        .iter()
        .zip(1u64..)
        .filter_map(|(e, id)| {
            // Every entry has a non-empty name and at least one dose.
            let name = NonEmptyText::new(e.name).ok()?;
            let kind = VaccineKind::classify(e.name);
            Vaccine::new(VaccineId(id), name, kind, e.target_group, e.total_doses)
                .ok()
                .map(|v| v.with_vial(e.doses_per_vial, e.usable_hours))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_the_whole_schedule() {
        let catalog = reference_catalog();
        assert_eq!(catalog.len(), REFERENCE.len());
        assert_eq!(catalog[0].id(), VaccineId(1));
        assert_eq!(catalog[18].id(), VaccineId(19));
        assert!(catalog.iter().all(|v| v.total_doses() >= 1));
    }

    #[test]
    fn kinds_are_attached() {
        let catalog = reference_catalog();
        let kind_of = |name: &str| {
            catalog
                .iter()
                .find(|v| v.name().as_str() == name)
                .map(|v| v.kind())
        };

        assert_eq!(kind_of("BCG"), Some(VaccineKind::Bcg));
        assert_eq!(kind_of("Polio 0"), Some(VaccineKind::PolioBirth));
        assert_eq!(kind_of("Polio 2"), Some(VaccineKind::Other));
        assert_eq!(kind_of("Pneumo 3"), Some(VaccineKind::Pneumococcal));
        assert_eq!(kind_of("Toxoide Td"), Some(VaccineKind::TetanusToxoid));
        assert_eq!(kind_of("Vitamina A"), Some(VaccineKind::VitaminA));
    }

    #[test]
    fn hpv_and_td_are_multi_dose() {
        let catalog = reference_catalog();
        let hpv = catalog.iter().find(|v| v.kind() == VaccineKind::Hpv).unwrap();
        assert_eq!(hpv.total_doses(), 2);
        assert_eq!(hpv.target_group(), TargetGroup::HpvEligible);

        let td = catalog
            .iter()
            .find(|v| v.kind() == VaccineKind::TetanusToxoid)
            .unwrap();
        assert_eq!(td.total_doses(), 5);
        assert_eq!(td.doses_per_vial(), 10);
    }
}
