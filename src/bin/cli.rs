//! Gismondi CLI
//!
//! Command-line client for the clinic API:
//! - Sign in / register / sign out
//! - Classify a fundus image and generate a report
//! - Look up medical histories and diagnoses

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use gismondi::api::{HttpClinicClient, Patient};
use gismondi::auth::{FormOutcome, LoginForm, RegisterForm, RoleFields};
use gismondi::classify::{
    mime_from_extension, ClassificationWorkflow, ImageCandidate, InMemoryPreviews,
    PredictionResult, SelectionSource,
};
use gismondi::config::{generate_default_config, Config};
use gismondi::history::{
    age_from_str, format_api_date, format_api_datetime, time_ago_str, DiagnosisSummary,
    MedicalHistorySearch, PatientDiagnoses,
};
use gismondi::nav::{filter_by_role, MAIN_NAV, SECONDARY_NAV};
use gismondi::notify::Notification;
use gismondi::session::{FileStore, Role, Session};
use gismondi::{driver, logging};

#[derive(Parser)]
#[command(name = "gismondi")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Clínica Oftalmológica Gismondi - dashboard client")]
#[command(long_about = "Command-line client for the Gismondi clinic API.\nSign in, classify retinal images and review medical histories.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session
    Login {
        /// Account email
        email: String,
        /// Password (or set GISMONDI_PASSWORD)
        #[arg(long, env = "GISMONDI_PASSWORD", hide_env_values = true)]
        password: String,
        /// Role to sign in as (patient, doctor, admin)
        #[arg(short, long, default_value = "patient")]
        role: Role,
    },

    /// Create an account
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "GISMONDI_PASSWORD", hide_env_values = true)]
        password: String,
        /// Defaults to --password
        #[arg(long)]
        password_confirmation: Option<String>,
        /// Role to register as (patient, doctor, admin)
        #[arg(short, long, default_value = "patient")]
        role: Role,
        /// Patient: national id
        #[arg(long, default_value = "")]
        dni: String,
        /// Patient: birth date (YYYY-MM-DD)
        #[arg(long, default_value = "")]
        birth_date: String,
        /// Doctor: medical college number
        #[arg(long, default_value = "")]
        cmp: String,
        /// Doctor: specialty
        #[arg(long, default_value = "")]
        specialty: String,
        /// Admin: position
        #[arg(long, default_value = "")]
        position: String,
        /// Admin: responsible area
        #[arg(long, default_value = "")]
        responsible_area: String,
    },

    /// Remove the stored session
    Logout,

    /// Show the signed-in account
    Whoami,

    /// Show the dashboard navigation for the current role
    Nav,

    /// Classify a retinal image
    Classify {
        /// Path to the image
        image: PathBuf,
        /// Generate a report for this patient DNI after classifying
        #[arg(long)]
        report_dni: Option<String>,
    },

    /// Look up a patient's medical history by DNI (doctors)
    History {
        dni: String,
    },

    /// Show your diagnoses (patients)
    Diagnoses,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

struct App {
    config: Config,
    api: HttpClinicClient,
    store: FileStore,
    json: bool,
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    Ok(config)
}

/// Print notifications; returns whether any was an error
fn show(notifications: &[Notification]) -> bool {
    let mut failed = false;
    for notification in notifications {
        if notification.is_error() {
            failed = true;
            eprintln!("✗ {}", notification);
        } else {
            println!("✓ {}", notification);
        }
    }
    failed
}

fn finish_form(outcome: &FormOutcome) {
    let failed = show(&outcome.notifications);
    if let Some(redirect) = outcome.redirect {
        println!("→ {}", redirect.route.path());
    }
    if failed {
        std::process::exit(1);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    logging::init(&config.logging, "");

    let api = HttpClinicClient::new(
        config.api.base_url.clone(),
        config.endpoints.clone(),
        config.api.timeout(),
    )?;
    let store = FileStore::open(&config.session.path);
    tracing::debug!("Session file: {:?}", store.path());

    let mut app = App {
        config,
        api,
        store,
        json: cli.format == "json",
    };

    match cli.command {
        Commands::Login {
            email,
            password,
            role,
        } => {
            let form = LoginForm::new(email, password, role);
            let outcome = driver::login(
                &app.api,
                &mut app.store,
                &form,
                app.config.ui.redirect_delay(),
            )
            .await;
            finish_form(&outcome);
        }

        Commands::Register {
            first_name,
            last_name,
            email,
            password,
            password_confirmation,
            role,
            dni,
            birth_date,
            cmp,
            specialty,
            position,
            responsible_area,
        } => {
            let fields = match role {
                Role::Patient => RoleFields::Patient { dni, birth_date },
                Role::Doctor => RoleFields::Doctor { cmp, specialty },
                Role::Admin => RoleFields::Admin {
                    position,
                    responsible_area,
                },
            };
            let form = RegisterForm {
                first_name,
                last_name,
                email,
                password_confirmation: password_confirmation.unwrap_or_else(|| password.clone()),
                password,
                fields,
            };
            let outcome =
                driver::register(&app.api, &form, app.config.ui.redirect_delay()).await;
            finish_form(&outcome);
        }

        Commands::Logout => {
            Session::clear(&mut app.store)?;
            println!("Sesión cerrada");
        }

        Commands::Whoami => {
            let session = Session::load(&mut app.store);
            if !session.is_authenticated() {
                println!("No hay sesión activa.");
                println!();
                println!("Inicia sesión con:");
                println!("  gismondi login <email> --role doctor");
                return Ok(());
            }
            let card = session.display_user();
            if app.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "name": card.name,
                        "email": card.email,
                        "avatar": card.avatar,
                        "role": session.role,
                        "profile_id": session.profile_id().map(|id| id.to_string()),
                    }))?
                );
            } else {
                println!("{}", card.name);
                println!("  Email: {}", card.email);
                println!(
                    "  Rol:   {}",
                    session.role.map(|r| r.label()).unwrap_or("Desconocido")
                );
                if let Some(id) = session.profile_id() {
                    println!("  Perfil: #{}", id);
                }
            }
        }

        Commands::Nav => {
            let session = Session::load(&mut app.store);
            for (heading, items) in [("Principal", MAIN_NAV), ("Otros", SECONDARY_NAV)] {
                println!("{}:", heading);
                for item in filter_by_role(items, session.role) {
                    println!("  {} {:<22} {}", item.icon.glyph(), item.title, item.url);
                }
            }
        }

        Commands::Classify { image, report_dni } => {
            classify(&mut app, &image, report_dni).await?;
        }

        Commands::History { dni } => {
            let session = Session::load(&mut app.store);
            let mut search = MedicalHistorySearch::new();
            search.dni = dni;
            let mut notifications = Vec::new();
            driver::search_history(&app.api, &session, &mut search, &mut notifications).await;

            let failed = show(&notifications);
            if let Some(patient) = search.patient() {
                print_patient(patient, app.json)?;
            }
            if failed {
                std::process::exit(1);
            }
        }

        Commands::Diagnoses => {
            let session = Session::load(&mut app.store);
            let mut diagnoses = PatientDiagnoses::new();
            let mut notifications = Vec::new();
            driver::load_diagnoses(&app.api, &session, &mut diagnoses, &mut notifications).await;

            let failed = show(&notifications);
            if let Some(patient) = diagnoses.patient() {
                if !app.json {
                    print_summary(&diagnoses.summary());
                }
                print_patient(patient, app.json)?;
            }
            if failed {
                std::process::exit(1);
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

async fn classify(
    app: &mut App,
    path: &Path,
    report_dni: Option<String>,
) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("reading {:?}", path))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());
    let candidate = ImageCandidate::new(
        name,
        mime_from_extension(&path.to_string_lossy()),
        bytes.len() as u64,
    );

    let session = Session::load(&mut app.store);
    let mut workflow = ClassificationWorkflow::new(InMemoryPreviews::new())
        .with_max_bytes(app.config.ui.max_upload_bytes);
    let mut notifications = Vec::new();

    if !workflow.select_image(candidate, bytes, SelectionSource::Picker, &mut notifications) {
        show(&notifications);
        std::process::exit(1);
    }

    driver::classify(&app.api, &session, &mut workflow, &mut notifications).await;

    if let Some(prediction) = workflow.prediction() {
        print_prediction(prediction, app.json)?;

        if let Some(dni) = report_dni {
            if workflow.open_report_dialog(&mut notifications) {
                workflow.set_report_dni(dni);
                driver::report(&app.api, &session, &mut workflow, &mut notifications).await;
            }
        }
    }

    if show(&notifications) {
        std::process::exit(1);
    }
    Ok(())
}

fn print_prediction(prediction: &PredictionResult, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(prediction)?);
        return Ok(());
    }

    let label = &prediction.label;
    println!("{} ({})", label.display_text(), label.code());
    println!(
        "  Confianza: {} [{}]",
        prediction.confidence_text(),
        prediction.confidence_color()
    );
    if !label.description().is_empty() {
        println!("  {}", label.description());
    }
    let recommendations = label.recommendations();
    if !recommendations.is_empty() {
        println!();
        println!("Recomendaciones:");
        for line in recommendations {
            println!("  {}", line);
        }
    }
    Ok(())
}

fn print_summary(summary: &DiagnosisSummary) {
    println!("Total diagnósticos: {}", summary.total);
    println!("Médicos:            {}", summary.distinct_doctors);
    println!(
        "Última consulta:    {}",
        summary.last_visit_label(Utc::now().naive_utc())
    );
    for share in &summary.by_specialty {
        println!(
            "  {:<20} {:>3}%  {}",
            share.specialty,
            share.percent,
            share.count_label()
        );
    }
    println!();
}

fn print_patient(patient: &Patient, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(patient)?);
        return Ok(());
    }

    let today = Utc::now().date_naive();
    let now = Utc::now().naive_utc();

    println!("Paciente #{}", patient.id);
    println!("  DNI:        {}", patient.dni);
    println!("  Nacimiento: {}", format_api_date(&patient.birth_date));
    if let Some(age) = age_from_str(&patient.birth_date, today) {
        println!("  Edad:       {} años", age);
    }
    if let Some(history) = &patient.medical_history {
        println!("  Historial:  #{}", history.id);
        if !history.created_at.is_empty() {
            println!("  Creado:     {}", format_api_datetime(&history.created_at));
        }
    }

    let diagnoses = patient.diagnoses();
    println!();
    if diagnoses.is_empty() {
        println!("No hay diagnósticos registrados.");
        return Ok(());
    }

    println!("Diagnósticos ({}):", diagnoses.len());
    for diagnosis in diagnoses {
        let ago = time_ago_str(&diagnosis.diagnosis_date, now).unwrap_or_default();
        println!(
            "  #{:<4} {} ({})",
            diagnosis.id,
            format_api_date(&diagnosis.diagnosis_date),
            ago
        );
        if let Some(doctor) = &diagnosis.doctor {
            println!("        Dr. CMP {} - {}", doctor.cmp, doctor.specialty);
        }
        println!("        {}", diagnosis.description);
    }
    Ok(())
}
