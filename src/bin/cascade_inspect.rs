use clap::Parser;
use clinic_scheduler::*;
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "cascade-inspect")]
#[command(about = "Walk the clinic → consultant → service cascade over a JSON fixture")]
#[command(version)]
struct Cli {
    /// Fixture with `clinics`, `consultants`, `services`, `members` and
    /// `appointments` arrays
    #[arg(short, long)]
    fixture: PathBuf,
    /// Scheduler configuration (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Clinic to select
    #[arg(long)]
    clinic: Option<String>,
    /// Consultant to select
    #[arg(long)]
    consultant: Option<String>,
    /// Service to select
    #[arg(long)]
    service: Option<String>,
    /// Output format (json, text)
    #[arg(long, default_value = "text")]
    format: String,
}

#[derive(Debug, Default, Deserialize)]
struct Fixture {
    #[serde(default)]
    clinics: Vec<Clinic>,
    #[serde(default)]
    consultants: Vec<Consultant>,
    #[serde(default)]
    services: Vec<Service>,
    #[serde(default)]
    members: Vec<Member>,
    #[serde(default)]
    appointments: Vec<Appointment>,
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SchedulerConfig::from_json_file(path)?,
        None => SchedulerConfig::default(),
    };
    config.validate()?;

    let content = std::fs::read_to_string(&cli.fixture)?;
    let fixture: Fixture = serde_json::from_str(&content)?;
    let stores = MemoryStores::new(
        fixture.clinics,
        fixture.consultants,
        fixture.services,
        fixture.members,
        fixture.appointments,
    );

    let cascade = CascadeController::new(
        stores.stores(),
        Arc::new(TracingNotifier),
        Arc::new(config),
    );
    cascade.mount().await;

    if let Some(clinic) = &cli.clinic {
        cascade.select_clinic(clinic.as_str()).await;
    }
    if let Some(consultant) = &cli.consultant {
        cascade.select_consultants([consultant.as_str()]).await;
    }
    let details = match &cli.service {
        Some(service) => cascade.select_service(service.as_str()).await,
        None => None,
    };

    let state = cascade.snapshot().await;
    match cli.format.as_str() {
        "json" => {
            let report = serde_json::json!({
                "selection": state.selection(),
                "clinics": state.clinic_options(),
                "members": state.member_options(),
                "consultants": state.consultant_options(),
                "services": state.service_options(),
                "details": details,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => print_text(&state, details.as_ref(), cli.service.as_deref()),
    }

    Ok(())
}

fn print_text(state: &CascadeState, details: Option<&ServiceDetails>, service: Option<&str>) {
    println!("Clinics: {}", state.clinic_options().len());
    println!("Members: {}", state.member_options().len());

    if let Some(clinic) = &state.selection().clinic {
        println!("\nConsultants for {clinic}:");
        print_stage(state.consultants().error(), &state.consultant_options());
    }

    if let Some(consultant) = state.selection().single_consultant() {
        println!("\nServices for {consultant}:");
        print_stage(state.services().error(), &state.service_options());
    }

    if let Some(service) = service {
        println!("\nService {service}:");
        match details {
            Some(details) => {
                println!("  Name: {}", details.name);
                println!("  Duration: {}", details.duration);
                if let Some(category) = &details.category {
                    println!("  Category: {category}");
                }
                if let Some(fee) = details.fee {
                    println!("  Fee: {fee:.2}");
                }
            }
            None => println!("  not in the loaded service list"),
        }
    }
}

fn print_stage(error: Option<&LoadError>, options: &[SelectOption]) {
    if let Some(error) = error {
        println!("  failed: {}", error.message);
        return;
    }
    if options.is_empty() {
        println!("  (none)");
    }
    for option in options {
        println!("  - {} [{}]", option.label, option.value);
    }
}
