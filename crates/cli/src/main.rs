use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vax_core::{
    config::utc_offset_from_env_value, plan_administration, reference_catalog, AgeBreakdown,
    CoreConfig, Patient, VaccinationCard, Vaccine, VaccineId,
};
use vax_records::{AdministrationHistory, PatientRecord, VaccineCatalog};

#[derive(Parser)]
#[command(name = "vax")]
#[command(about = "Vaccination registry eligibility CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the age breakdown since an anchor date
    Age {
        /// Birth or delivery date (YYYY-MM-DD)
        anchor: NaiveDate,
        /// Reference date (defaults to the clinic's current date)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// List the vaccine catalogue
    Catalog {
        /// Catalogue YAML file (defaults to the reference catalogue)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Evaluate one vaccine for a patient
    Status {
        #[command(flatten)]
        snapshot: SnapshotArgs,
        /// Vaccine id in the catalogue
        #[arg(long)]
        vaccine: u64,
    },
    /// Print the full vaccination card for a patient
    Card {
        #[command(flatten)]
        snapshot: SnapshotArgs,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Check whether a dose can be recorded and number it
    Plan {
        #[command(flatten)]
        snapshot: SnapshotArgs,
        /// Vaccine id in the catalogue
        #[arg(long)]
        vaccine: u64,
    },
}

#[derive(Args)]
struct SnapshotArgs {
    /// Patient YAML file
    #[arg(long)]
    patient: PathBuf,
    /// Catalogue YAML file (defaults to the reference catalogue)
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Administration history YAML file
    #[arg(long)]
    history: Option<PathBuf>,
    /// Reference date (defaults to the clinic's current date)
    #[arg(long)]
    today: Option<NaiveDate>,
}

/// Everything one evaluation needs, loaded and checked.
struct Snapshot {
    patient: Patient,
    catalog: Vec<Vaccine>,
    history: Vec<vax_core::Administration>,
    today: NaiveDate,
}

impl Snapshot {
    fn load(args: SnapshotArgs, cfg: &CoreConfig) -> anyhow::Result<Self> {
        let today = resolve_today(args.today, cfg);
        let patient = PatientRecord::load(&args.patient)
            .with_context(|| format!("loading patient {}", args.patient.display()))?;
        PatientRecord::check_dates(&patient, today)?;

        let catalog = load_catalog(args.catalog.as_deref())?;
        let history = match args.history {
            Some(path) => AdministrationHistory::load(&path)
                .with_context(|| format!("loading history {}", path.display()))?,
            None => Vec::new(),
        };
        let history = AdministrationHistory::for_patient(history, patient.id);

        Ok(Self {
            patient,
            catalog,
            history,
            today,
        })
    }

    fn vaccine(&self, id: u64) -> anyhow::Result<&Vaccine> {
        self.catalog
            .iter()
            .find(|v| v.id() == VaccineId(id))
            .with_context(|| format!("vaccine {id} is not in the catalogue"))
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(log_filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let utc_offset = utc_offset_from_env_value(std::env::var("VAX_UTC_OFFSET").ok())?;
    let cfg = CoreConfig::new(utc_offset);

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Age { anchor, today }) => {
            let today = resolve_today(today, &cfg);
            let age = AgeBreakdown::between(anchor, today);
            println!("{age}");
            println!(
                "total months: {}, approx days: {}, approx weeks: {}",
                age.total_months(),
                age.approx_total_days(),
                age.approx_weeks()
            );
        }
        Some(Commands::Catalog { file }) => {
            let catalog = load_catalog(file.as_deref())?;
            for v in &catalog {
                println!(
                    "{:>3}  {:<20} {:<18} {:<18} doses: {}",
                    v.id(),
                    v.name(),
                    v.kind(),
                    v.target_group(),
                    v.total_doses()
                );
            }
        }
        Some(Commands::Status { snapshot, vaccine }) => {
            let snapshot = Snapshot::load(snapshot, &cfg)?;
            let vaccine = snapshot.vaccine(vaccine)?;
            let verdict = vax_core::evaluate(
                &snapshot.patient,
                vaccine,
                &snapshot.history,
                snapshot.today,
            );
            println!("{}: {} ({})", vaccine.name(), verdict.status, verdict.label);
        }
        Some(Commands::Card { snapshot, json }) => {
            let snapshot = Snapshot::load(snapshot, &cfg)?;
            let card = VaccinationCard::build(
                &snapshot.patient,
                &snapshot.catalog,
                &snapshot.history,
                snapshot.today,
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&card)?);
            } else {
                print_card(&snapshot.patient, &card);
            }
        }
        Some(Commands::Plan { snapshot, vaccine }) => {
            let snapshot = Snapshot::load(snapshot, &cfg)?;
            let vaccine = snapshot.vaccine(vaccine)?;
            match plan_administration(
                &snapshot.patient,
                vaccine,
                &snapshot.history,
                snapshot.today,
            ) {
                Ok(plan) => println!("{}: record dose {}", vaccine.name(), plan.dose_number),
                Err(e) => {
                    tracing::warn!("administration refused for patient {}", snapshot.patient.id);
                    eprintln!("{e}");
                    std::process::exit(2);
                }
            }
        }
        None => {
            println!("Use 'vax --help' for commands");
        }
    }

    Ok(())
}

/// Used when `RUST_LOG` is unset. Rule decisions are logged by `vax_core` at debug level, so
/// `RUST_LOG=vax_core=debug` shows which rule decided each verdict.
const DEFAULT_LOG_FILTER: &str = "vax=info,vax_core=info,vax_records=info";

fn log_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn resolve_today(explicit: Option<NaiveDate>, cfg: &CoreConfig) -> NaiveDate {
    explicit.unwrap_or_else(|| cfg.clinic_today(Utc::now()))
}

fn load_catalog(path: Option<&Path>) -> anyhow::Result<Vec<Vaccine>> {
    match path {
        Some(path) => VaccineCatalog::load(path)
            .with_context(|| format!("loading catalogue {}", path.display())),
        None => {
            tracing::info!("no catalogue given, using the reference catalogue");
            Ok(reference_catalog())
        }
    }
}

fn print_card(patient: &Patient, card: &VaccinationCard) {
    println!("{} (id {}), {} as of {}", patient.name, patient.id, card.age, card.as_of);
    for entry in &card.entries {
        println!(
            "  {:<20} {}/{}  {:<9} {}",
            entry.vaccine.as_str(),
            entry.doses_taken,
            entry.total_doses,
            entry.verdict.status.as_str(),
            entry.verdict.label
        );
    }
    let summary = card.summary();
    println!(
        "due: {}, complete: {}, blocked: {}",
        summary.due, summary.complete, summary.blocked
    );
}
