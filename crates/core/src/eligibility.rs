//! Vaccine eligibility evaluation.
//!
//! A verdict is produced by walking a fixed, ordered chain of rules. Each rule either decides
//! the verdict or falls through to the next one; the first decision wins. If no rule decides,
//! the dose is due.
//!
//! Rules dispatch on [`VaccineKind`] and [`TargetGroup`], never on display names. Only the
//! number of recorded doses is considered; intervals between doses are not checked.

use crate::age::AgeBreakdown;
use crate::constants::*;
use chrono::NaiveDate;
use serde::Serialize;
use vax_types::{Administration, Patient, TargetGroup, Vaccine, VaccineKind};

/// Eligibility state of a vaccine for a patient.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// All doses of the scheme have been given.
    Complete,
    /// The next dose may be given.
    Due,
    /// The next dose must not be given.
    Blocked,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Complete => "complete",
            Status::Due => "due",
            Status::Blocked => "blocked",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Outcome of an eligibility check: a status and the reason shown to staff.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub status: Status,
    pub label: String,
}

impl Verdict {
    pub fn complete() -> Self {
        Self {
            status: Status::Complete,
            label: LABEL_COMPLETE.to_string(),
        }
    }

    pub fn due() -> Self {
        Self {
            status: Status::Due,
            label: LABEL_DUE.to_string(),
        }
    }

    pub fn blocked(label: &str) -> Self {
        Self {
            status: Status::Blocked,
            label: label.to_string(),
        }
    }

    /// Only a due dose may be recorded.
    pub fn is_administrable(&self) -> bool {
        self.status == Status::Due
    }
}

/// Snapshot shared by every rule in one evaluation.
struct RuleInput<'a> {
    patient: &'a Patient,
    vaccine: &'a Vaccine,
    age: AgeBreakdown,
    doses_taken: u32,
    today: NaiveDate,
}

type Rule = fn(&RuleInput<'_>) -> Option<Verdict>;

/// Evaluated top to bottom; the first `Some` decides.
const RULE_CHAIN: [(&str, Rule); 9] = [
    ("scheme_complete", scheme_complete),
    ("bcg_first_year", bcg_first_year),
    ("birth_dose_window", birth_dose_window),
    ("rotavirus_first_dose", rotavirus_first_dose),
    ("penta_pneumo_first_dose", penta_pneumo_first_dose),
    ("hpv_girls_9_to_12", hpv_girls_9_to_12),
    ("tetanus_toxoid_postpartum", tetanus_toxoid_postpartum),
    ("vitamin_a_postpartum", vitamin_a_postpartum),
    ("child_age_ceiling", child_age_ceiling),
];

/// Decide whether the next dose of `vaccine` is complete, due or blocked for `patient`.
///
/// `history` is the patient's administration history; only records for `vaccine` are counted.
/// `today` is the clinic's current date and is the only time input.
///
/// This function never fails: unknown vaccines fall through to the target-group ceiling and
/// then to due.
pub fn evaluate(
    patient: &Patient,
    vaccine: &Vaccine,
    history: &[Administration],
    today: NaiveDate,
) -> Verdict {
    let input = RuleInput {
        patient,
        vaccine,
        age: AgeBreakdown::between(patient.date_of_birth, today),
        doses_taken: doses_taken(vaccine, history),
        today,
    };

    for (rule, check) in RULE_CHAIN {
        if let Some(verdict) = check(&input) {
            tracing::debug!(
                patient = %patient.id,
                vaccine = %vaccine.name(),
                rule,
                status = %verdict.status,
                "eligibility decided"
            );
            return verdict;
        }
    }

    tracing::debug!(
        patient = %patient.id,
        vaccine = %vaccine.name(),
        "no rule matched, dose due"
    );
    Verdict::due()
}

/// Number of recorded doses of `vaccine` in `history`.
pub fn doses_taken(vaccine: &Vaccine, history: &[Administration]) -> u32 {
    let count = history
        .iter()
        .filter(|record| record.vaccine_id == vaccine.id())
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Due while no dose has been recorded, complete afterwards.
fn single_dose_verdict(doses_taken: u32) -> Verdict {
    if doses_taken == 0 {
        Verdict::due()
    } else {
        Verdict::complete()
    }
}

// ============================================================================
// Rules
// ============================================================================

fn scheme_complete(input: &RuleInput<'_>) -> Option<Verdict> {
    (input.doses_taken >= input.vaccine.total_doses()).then(Verdict::complete)
}

fn bcg_first_year(input: &RuleInput<'_>) -> Option<Verdict> {
    if input.vaccine.kind() != VaccineKind::Bcg {
        return None;
    }
    if input.age.years >= BCG_LIMIT_YEARS {
        return Some(Verdict::blocked(LABEL_BLOCKED_OVER_ONE_YEAR));
    }
    Some(single_dose_verdict(input.doses_taken))
}

fn birth_dose_window(input: &RuleInput<'_>) -> Option<Verdict> {
    if !matches!(
        input.vaccine.kind(),
        VaccineKind::HepatitisBBirth | VaccineKind::PolioBirth
    ) {
        return None;
    }
    if input.age.approx_total_days() > BIRTH_DOSE_MAX_DAYS {
        return Some(Verdict::blocked(LABEL_BLOCKED_OVER_24_HOURS));
    }
    Some(single_dose_verdict(input.doses_taken))
}

fn rotavirus_first_dose(input: &RuleInput<'_>) -> Option<Verdict> {
    let too_late = input.vaccine.kind() == VaccineKind::Rotavirus
        && input.doses_taken == 0
        && input.age.total_months() > ROTAVIRUS_FIRST_DOSE_MAX_MONTHS;
    too_late.then(|| Verdict::blocked(LABEL_BLOCKED_OVER_FOUR_MONTHS))
}

fn penta_pneumo_first_dose(input: &RuleInput<'_>) -> Option<Verdict> {
    let too_late = matches!(
        input.vaccine.kind(),
        VaccineKind::Pentavalent | VaccineKind::Pneumococcal
    ) && input.doses_taken == 0
        && input.age.years >= PENTA_PNEUMO_START_LIMIT_YEARS;
    too_late.then(|| Verdict::blocked(LABEL_BLOCKED_OVER_TWO_YEARS))
}

fn hpv_girls_9_to_12(input: &RuleInput<'_>) -> Option<Verdict> {
    if input.vaccine.kind() != VaccineKind::Hpv {
        return None;
    }
    let years = input.age.years;
    let eligible = input.patient.is_female() && (HPV_MIN_YEARS..=HPV_MAX_YEARS).contains(&years);
    (!eligible).then(|| Verdict::blocked(LABEL_HPV_GIRLS_ONLY))
}

/// Only the pregnancy-targeted Td entry is affected; the fertile-age entry is not.
fn tetanus_toxoid_postpartum(input: &RuleInput<'_>) -> Option<Verdict> {
    let blocked = input.vaccine.kind() == VaccineKind::TetanusToxoid
        && input.vaccine.target_group() == TargetGroup::PregnantWoman
        && input.patient.postpartum;
    blocked.then(|| Verdict::blocked(LABEL_BLOCKED_POSTPARTUM))
}

fn vitamin_a_postpartum(input: &RuleInput<'_>) -> Option<Verdict> {
    if input.vaccine.kind() != VaccineKind::VitaminA {
        return None;
    }
    if !input.patient.postpartum {
        return Some(Verdict::blocked(LABEL_POSTPARTUM_ONLY));
    }

    // Without a recorded delivery date the window cannot be checked.
    let delivery = input.patient.delivery_anchor()?;
    let since_delivery = AgeBreakdown::between(delivery, input.today);
    (since_delivery.approx_weeks() > VITAMIN_A_MAX_WEEKS)
        .then(|| Verdict::blocked(LABEL_BLOCKED_OVER_EIGHT_WEEKS))
}

fn child_age_ceiling(input: &RuleInput<'_>) -> Option<Verdict> {
    let too_old = input.vaccine.target_group() == TargetGroup::Child
        && input.age.years >= CHILD_LIMIT_YEARS;
    too_old.then(|| Verdict::blocked(LABEL_BLOCKED_OVER_FIVE_YEARS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vax_types::{NonEmptyText, PatientId, Sex, VaccineId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn today() -> NaiveDate {
        date(2024, 6, 1)
    }

    fn patient(born: NaiveDate, sex: Sex) -> Patient {
        Patient::new(PatientId(1), "Test Patient", born, sex)
    }

    fn vaccine(id: u64, name: &str, group: TargetGroup, total_doses: u32) -> Vaccine {
        Vaccine::new(
            VaccineId(id),
            NonEmptyText::new(name).expect("valid name"),
            VaccineKind::classify(name),
            group,
            total_doses,
        )
        .expect("valid vaccine")
    }

    fn doses(vaccine: &Vaccine, count: u32) -> Vec<Administration> {
        (1..=count)
            .map(|n| Administration::new(PatientId(1), vaccine.id(), n, date(2020, 1, 1)))
            .collect()
    }

    fn check(patient: &Patient, vaccine: &Vaccine, history: &[Administration]) -> Verdict {
        evaluate(patient, vaccine, history, today())
    }

    #[test]
    fn completion_overrides_blocking_rules() {
        let bcg = vaccine(1, "BCG", TargetGroup::Child, 1);
        let toddler = patient(date(2022, 6, 1), Sex::Male);
        assert_eq!(check(&toddler, &bcg, &doses(&bcg, 1)), Verdict::complete());
    }

    #[test]
    fn bcg_window() {
        let bcg = vaccine(1, "BCG", TargetGroup::Child, 1);

        let newborn = patient(today(), Sex::Female);
        assert_eq!(check(&newborn, &bcg, &[]), Verdict::due());

        let eleven_months = patient(date(2023, 7, 1), Sex::Female);
        assert_eq!(check(&eleven_months, &bcg, &[]), Verdict::due());

        let one_year = patient(date(2023, 6, 1), Sex::Female);
        let verdict = check(&one_year, &bcg, &[]);
        assert_eq!(verdict.status, Status::Blocked);
        assert_eq!(verdict.label, "Bloqueado (>1 ano)");
    }

    #[test]
    fn bcg_partial_multi_dose_scheme_reports_complete() {
        let bcg = vaccine(1, "BCG", TargetGroup::Child, 2);
        let infant = patient(date(2024, 3, 1), Sex::Male);
        assert_eq!(check(&infant, &bcg, &doses(&bcg, 1)), Verdict::complete());
    }

    #[test]
    fn birth_doses_within_a_day() {
        for name in ["HepB0", "Polio 0"] {
            let birth_dose = vaccine(2, name, TargetGroup::Child, 1);

            let one_day = patient(date(2024, 5, 31), Sex::Male);
            assert_eq!(check(&one_day, &birth_dose, &[]), Verdict::due(), "{name}");

            let two_days = patient(date(2024, 5, 30), Sex::Male);
            let verdict = check(&two_days, &birth_dose, &[]);
            assert_eq!(verdict, Verdict::blocked("Bloqueado (>24h)"), "{name}");
        }
    }

    #[test]
    fn later_polio_doses_have_no_birth_window() {
        let polio_1 = vaccine(4, "Polio 1", TargetGroup::Child, 1);
        let two_months = patient(date(2024, 4, 1), Sex::Male);
        assert_eq!(check(&two_months, &polio_1, &[]), Verdict::due());
    }

    #[test]
    fn rotavirus_first_dose_ceiling() {
        let rota = vaccine(13, "Rotavirus 1", TargetGroup::Child, 2);

        let four_months = patient(date(2024, 2, 1), Sex::Female);
        assert_eq!(check(&four_months, &rota, &[]), Verdict::due());

        let five_months = patient(date(2024, 1, 1), Sex::Female);
        assert_eq!(
            check(&five_months, &rota, &[]),
            Verdict::blocked("Bloqueado (>4 meses)")
        );

        // Once started, the ceiling no longer applies.
        assert_eq!(check(&five_months, &rota, &doses(&rota, 1)), Verdict::due());
    }

    #[test]
    fn penta_and_pneumo_cannot_start_after_two_years() {
        for name in ["Penta 1", "Pneumo 2"] {
            let v = vaccine(7, name, TargetGroup::Child, 3);

            let two_years = patient(date(2022, 6, 1), Sex::Male);
            assert_eq!(
                check(&two_years, &v, &[]),
                Verdict::blocked("Bloqueado (>2 anos)"),
                "{name}"
            );
            assert_eq!(check(&two_years, &v, &doses(&v, 1)), Verdict::due(), "{name}");

            let twenty_three_months = patient(date(2022, 7, 1), Sex::Male);
            assert_eq!(check(&twenty_three_months, &v, &[]), Verdict::due(), "{name}");
        }
    }

    #[test]
    fn hpv_only_for_girls_9_to_12() {
        let hpv = vaccine(17, "HPV", TargetGroup::HpvEligible, 2);
        let blocked = Verdict::blocked("Apenas meninas 9-12 anos");

        assert_eq!(check(&patient(date(2014, 1, 1), Sex::Male), &hpv, &[]), blocked);
        assert_eq!(check(&patient(date(2015, 6, 2), Sex::Female), &hpv, &[]), blocked);
        assert_eq!(
            check(&patient(date(2014, 1, 1), Sex::Female), &hpv, &[]),
            Verdict::due()
        );
        assert_eq!(
            check(&patient(date(2011, 6, 2), Sex::Female), &hpv, &doses(&hpv, 1)),
            Verdict::due()
        );
        assert_eq!(check(&patient(date(2011, 6, 1), Sex::Female), &hpv, &[]), blocked);
    }

    #[test]
    fn pregnancy_td_blocked_after_delivery() {
        let td_pregnant = vaccine(18, "Toxoide Td", TargetGroup::PregnantWoman, 5);
        let td_fertile = vaccine(19, "Toxoide Td", TargetGroup::FertileAgeWoman, 5);
        let mother = patient(date(1996, 2, 10), Sex::Female).with_delivery(Some(date(2024, 5, 20)));

        assert_eq!(
            check(&mother, &td_pregnant, &[]),
            Verdict::blocked("Bloqueado (Pós-parto)")
        );
        assert_eq!(check(&mother, &td_fertile, &[]), Verdict::due());

        let mut pregnant = patient(date(1996, 2, 10), Sex::Female);
        pregnant.pregnant = true;
        assert_eq!(check(&pregnant, &td_pregnant, &doses(&td_pregnant, 2)), Verdict::due());
    }

    #[test]
    fn vitamin_a_within_eight_weeks_of_delivery() {
        let vit_a = vaccine(20, "Vitamina A", TargetGroup::PostpartumWoman, 1);
        let born = date(1998, 8, 8);

        let mut not_postpartum = patient(born, Sex::Female);
        not_postpartum.pregnant = true;
        not_postpartum.delivery_date = Some(date(2024, 5, 20));
        assert_eq!(
            check(&not_postpartum, &vit_a, &[]),
            Verdict::blocked("Apenas Puérperas")
        );

        // 2 months 7 days: 9 approximate weeks.
        let late = patient(born, Sex::Female).with_delivery(Some(date(2024, 3, 25)));
        assert_eq!(
            check(&late, &vit_a, &[]),
            Verdict::blocked("Bloqueado (>8 semanas)")
        );

        let recent = patient(born, Sex::Female).with_delivery(Some(date(2024, 5, 4)));
        assert_eq!(check(&recent, &vit_a, &[]), Verdict::due());

        let undated = patient(born, Sex::Female).with_delivery(None);
        assert_eq!(check(&undated, &vit_a, &[]), Verdict::due());
    }

    #[test]
    fn vitamin_a_window_after_month_end_delivery() {
        let vit_a = vaccine(20, "Vitamina A", TargetGroup::PostpartumWoman, 1);
        let mother =
            patient(date(1998, 8, 8), Sex::Female).with_delivery(Some(date(2024, 12, 31)));

        // 2 months 6 days: exactly 8 approximate weeks.
        assert_eq!(evaluate(&mother, &vit_a, &[], date(2025, 3, 9)), Verdict::due());
        assert_eq!(
            evaluate(&mother, &vit_a, &[], date(2025, 3, 14)),
            Verdict::blocked("Bloqueado (>8 semanas)")
        );
    }

    #[test]
    fn child_vaccines_blocked_from_five_years() {
        let measles = vaccine(15, "Sarampo-Rubeola 1", TargetGroup::Child, 1);

        let five = patient(date(2019, 6, 1), Sex::Male);
        assert_eq!(
            check(&five, &measles, &[]),
            Verdict::blocked("Bloqueado (>5 anos)")
        );

        let four_and_eleven = patient(date(2019, 7, 1), Sex::Male);
        assert_eq!(check(&four_and_eleven, &measles, &[]), Verdict::due());
    }

    #[test]
    fn adult_vaccines_have_no_ceiling() {
        let flu = vaccine(30, "Influenza", TargetGroup::Adult, 1);
        let elder = patient(date(1940, 1, 1), Sex::Female);
        assert_eq!(check(&elder, &flu, &[]), Verdict::due());
    }

    #[test]
    fn only_matching_vaccine_doses_count() {
        let penta_1 = vaccine(7, "Penta 1", TargetGroup::Child, 1);
        let penta_2 = vaccine(8, "Penta 2", TargetGroup::Child, 1);
        let history = doses(&penta_1, 1);

        assert_eq!(doses_taken(&penta_1, &history), 1);
        assert_eq!(doses_taken(&penta_2, &history), 0);

        let infant = patient(date(2024, 1, 1), Sex::Female);
        assert_eq!(check(&infant, &penta_1, &history), Verdict::complete());
        assert_eq!(check(&infant, &penta_2, &history), Verdict::due());
    }

    #[test]
    fn never_complete_without_doses() {
        let today = today();
        let born = [today, date(2024, 5, 31), date(2023, 6, 1), date(2010, 1, 1)];
        let catalogue = crate::catalog::reference_catalog();

        for dob in born {
            for sex in [Sex::Male, Sex::Female] {
                let p = patient(dob, sex).with_delivery(Some(date(2024, 5, 1)));
                for v in &catalogue {
                    let verdict = evaluate(&p, v, &[], today);
                    assert_ne!(verdict.status, Status::Complete, "{}", v.name());
                    assert!(!verdict.label.is_empty());
                }
            }
        }
    }

    #[test]
    fn evaluation_is_repeatable() {
        let rota = vaccine(13, "Rotavirus 1", TargetGroup::Child, 1);
        let p = patient(date(2024, 1, 1), Sex::Female);
        let history = doses(&rota, 0);
        assert_eq!(check(&p, &rota, &history), check(&p, &rota, &history));
    }

    #[test]
    fn verdict_serialises_status_lowercase() {
        let json = serde_json::to_string(&Verdict::blocked("Bloqueado (>1 ano)"))
            .expect("serialise verdict");
        assert_eq!(json, r#"{"status":"blocked","label":"Bloqueado (>1 ano)"}"#);
    }
}
