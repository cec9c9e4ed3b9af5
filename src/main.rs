use analytics::StatsEngine;
use clap::{Parser, Subcommand};
use comfy_table::{Table, presets::UTF8_FULL};
use configuration::{AccessPolicyKind, Config, LoggingConfig, load_config};
use core_types::{CrewStatus, MissionPriority, MissionStatus, RecordId};
use database::{CrewRepository, InMemoryRepository, MissionRepository};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use web_server::{AppState, auth::policy_from_config};

/// The main entry point for the Mission Control application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load MISSION_CONTROL__* overrides from a .env file, if present.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = load_config(&cli.config)?;
    let _log_guard = init_tracing(&config.logging)?;

    let repo = InMemoryRepository::from_fixture_files(
        config.data.missions_file.as_deref(),
        config.data.crew_file.as_deref(),
    )?;

    match cli.command {
        Commands::Serve(args) => {
            if let Some(policy) = args.access_policy {
                config.access.policy = policy;
            }
            if let Some(token) = args.token {
                config.access.token = Some(token);
            }
            configuration::validate(&config)?;
            handle_serve(&config, args.addr, repo).await?;
        }
        Commands::Stats => handle_stats(repo).await?,
        Commands::Missions(args) => handle_missions(args, repo).await?,
        Commands::Crew(args) => handle_crew(args, repo).await?,
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Mission and crew tracking service with live mission statistics.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, short, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the REST API.
    Serve(ServeArgs),
    /// Print aggregate mission statistics.
    Stats,
    /// List missions, optionally filtered.
    Missions(MissionsArgs),
    /// List crew members, optionally filtered.
    Crew(CrewArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Listen address, overriding `server.host`/`server.port` (e.g. "127.0.0.1:8080").
    #[arg(long)]
    addr: Option<String>,

    /// Access policy for the mission routes, overriding `access.policy`.
    #[arg(long, value_enum)]
    access_policy: Option<AccessPolicyKind>,

    /// Bearer token, overriding `access.token`.
    #[arg(long)]
    token: Option<String>,
}

#[derive(Parser)]
struct MissionsArgs {
    /// Only missions with this status (pending, in-progress, completed, failed).
    #[arg(long)]
    status: Option<MissionStatus>,

    /// Only missions with this priority (high, medium, low).
    #[arg(long)]
    priority: Option<MissionPriority>,
}

#[derive(Parser)]
struct CrewArgs {
    /// Only crew members with this status (active, inactive).
    #[arg(long)]
    status: Option<CrewStatus>,

    /// Only crew members assigned to this mission id.
    #[arg(long)]
    mission: Option<RecordId>,
}

// ==============================================================================
// Logging
// ==============================================================================

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over `logging.level`. The returned guard flushes the file
/// writer and must be held until shutdown.
fn init_tracing(config: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.level))?;

    let (file_layer, guard) = match &config.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "mission-control.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);
    if config.json {
        registry.with(fmt::layer().json()).try_init()?;
    } else {
        registry.with(fmt::layer()).try_init()?;
    }

    Ok(guard)
}

// ==============================================================================
// Command Handlers
// ==============================================================================

async fn handle_serve(
    config: &Config,
    addr: Option<String>,
    repo: InMemoryRepository,
) -> anyhow::Result<()> {
    let addr = addr.unwrap_or_else(|| config.server.bind_address());
    let policy = policy_from_config(&config.access)?;
    let state = Arc::new(AppState::new(repo, policy));

    tracing::info!(addr = %addr, policy = ?config.access.policy, "Starting Mission Control API.");
    web_server::run_server(&addr, state).await
}

async fn handle_stats(repo: InMemoryRepository) -> anyhow::Result<()> {
    let missions = MissionRepository::list(&repo).await?;
    let engine = StatsEngine::new();
    let stats = engine.compute_stats(&missions);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["Total missions".to_string(), stats.total_missions.to_string()]);
    table.add_row(vec!["Active missions".to_string(), stats.active_missions.to_string()]);
    table.add_row(vec!["Success rate".to_string(), format!("{}%", stats.success_rate)]);
    table.add_row(vec![
        "Average duration".to_string(),
        format!("{} ms", stats.average_duration),
    ]);
    for priority in MissionPriority::ALL {
        table.add_row(vec![
            format!("Priority {priority}"),
            stats.priority_distribution.get(priority).to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}

async fn handle_missions(args: MissionsArgs, repo: InMemoryRepository) -> anyhow::Result<()> {
    let engine = StatsEngine::new();
    let mut missions = MissionRepository::list(&repo).await?;
    if let Some(status) = args.status {
        missions = engine.filter_by_status(&missions, status);
    }
    if let Some(priority) = args.priority {
        missions = engine.filter_by_priority(&missions, priority);
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "ID", "Title", "Status", "Priority", "Start", "End", "Days",
    ]);
    for mission in &missions {
        table.add_row(vec![
            mission.id.to_string(),
            mission.title.clone(),
            mission.status.to_string(),
            mission.priority.to_string(),
            mission.start_date.as_str().to_string(),
            mission
                .end_date
                .as_ref()
                .map(|d| d.as_str().to_string())
                .unwrap_or_else(|| "-".to_string()),
            engine.compute_duration(mission).to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}

async fn handle_crew(args: CrewArgs, repo: InMemoryRepository) -> anyhow::Result<()> {
    let engine = StatsEngine::new();
    let mut crew = CrewRepository::list(&repo).await?;
    if let Some(status) = args.status {
        crew = engine.filter_crew_by_status(&crew, status);
    }
    if let Some(mission_id) = &args.mission {
        crew = engine.filter_crew_by_mission(&crew, mission_id);
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "ID", "Name", "Role", "Specialization", "Status", "Missions",
    ]);
    for member in &crew {
        let missions: Vec<String> = member.missions.iter().map(ToString::to_string).collect();
        table.add_row(vec![
            member.id.to_string(),
            member.name.clone(),
            member.role.clone(),
            member.specialization.clone(),
            member.status.to_string(),
            missions.join(", "),
        ]);
    }

    println!("{table}");
    Ok(())
}
