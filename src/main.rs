use clap::Parser;
use group_assign::adapters::store::DEFAULT_DATA_FILE;
use group_assign::config::Command;
use group_assign::core::report;
use group_assign::domain::model::{AssignmentState, Participant};
use group_assign::utils::{logger, validation::Validate};
use group_assign::{AssignmentEngine, CliConfig, CourseConfig, JsonRosterStore, LocalStorage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting group-assign CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match &cli.config {
        Some(path) => CourseConfig::from_file(path)?,
        None => CourseConfig::default(),
    };
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let storage = LocalStorage::new(cli.data_dir.clone());
    let store = JsonRosterStore::new(storage, DEFAULT_DATA_FILE.to_string());
    let engine = AssignmentEngine::new(store, config.clone());

    match run(&cli.command, &engine, &config).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("Command failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}

async fn run<R, C>(
    command: &Command,
    engine: &AssignmentEngine<R, C>,
    config: &C,
) -> group_assign::Result<()>
where
    R: group_assign::core::RosterStore,
    C: group_assign::core::ConfigProvider,
{
    match command {
        Command::Register { name, code } => {
            let participant = engine.register(name, code).await?;
            println!(
                "✅ Registered {} ({})",
                participant.display_name, participant.code
            );
            println!("ℹ️  Groups are assigned by the administrator; check back with 'check'.");
        }
        Command::Check { code } => {
            let participant = engine.lookup(code).await?;
            println!("Name: {}", participant.display_name);
            match participant.assignment_state() {
                AssignmentState::Assigned(cell) => {
                    println!("Primary group: {}", cell.primary);
                    println!("Subgroup: {}", cell);
                }
                _ => println!("⏳ Groups have not been assigned yet. Please check back later."),
            }
        }
        Command::Assign { seed } => {
            let report = engine.assign(*seed).await?;
            println!("✅ Assignment round complete");
            println!("   already assigned: {}", report.already_assigned);
            println!("   newly assigned:   {}", report.newly_assigned);
            println!("   left unassigned:  {}", report.left_unassigned);
            if report.overflow > 0 {
                println!(
                    "⚠️  {} participant(s) exceed total capacity and stay pending",
                    report.overflow
                );
            }
        }
        Command::Clear => {
            let count = engine.clear_assignments().await?;
            println!("✅ Cleared assignments for {} participant(s)", count);
        }
        Command::Status => {
            let stats = engine.stats().await?;
            println!("Total registered:  {}", stats.total);
            println!("Assigned:          {}", stats.assigned);
            println!("Pending:           {}", stats.unassigned);
            println!("Active subgroups:  {}", stats.active_cells);
        }
        Command::Report => {
            let roster = engine.roster().await?;
            print!("{}", report::render_text(&roster, config, chrono::Utc::now()));
        }
        Command::ExportCsv => {
            let roster = engine.roster().await?;
            print!("{}", report::write_csv(&roster)?);
        }
        Command::Restore { file, yes } => {
            if !*yes {
                return Err(group_assign::AssignError::InvalidInput {
                    field: "yes".to_string(),
                    value: "false".to_string(),
                    reason: "Restore replaces the whole roster; re-run with --yes to confirm"
                        .to_string(),
                });
            }
            let bytes = std::fs::read(file)?;
            let records: Vec<Participant> = serde_json::from_slice(&bytes)?;
            let count = engine.replace_roster(records).await?;
            println!("✅ Roster replaced ({} participant(s))", count);
        }
    }
    Ok(())
}
