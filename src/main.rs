use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use toolsync::config::{self, Config, ConfigOverrides};
use toolsync::discovery::{FsLocator, LibraryDiscovery};
use toolsync::domain::{SyncDirection, SyncReport};
use toolsync::library::JsonLibraryStore;
use toolsync::sync::{SyncEvent, SyncOptions, ToolLibrarySynchronizer};

mod cli;

use cli::Cli;
use cli::commands::{Commands, SyncArgs};

fn setup_logging(config: &Config) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("toolsync")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("toolsync.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    let default_level = config.log_level.as_deref().unwrap_or("info");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        Commands::Pull { args } => handle_sync_command(SyncDirection::Pull, args, cli.is_verbose(), config),
        Commands::Push { args } => handle_sync_command(SyncDirection::Push, args, cli.is_verbose(), config),
        Commands::Libraries { json } => handle_libraries_command(*json, config),
    }
}

/// Locate the external library file: an existing path, or a discovered display name.
fn resolve_library(name: &str, config: &Config) -> Result<PathBuf> {
    let as_path = config::expand_home(Path::new(name));
    if as_path.is_file() {
        return Ok(as_path);
    }

    let discovery = LibraryDiscovery::new(FsLocator::from_config(config)?);
    let entry = discovery.resolve(name)?;
    info!("Resolved library {} to {}", name, entry.url);
    Ok(discovery.locator().path_of(&entry.url)?)
}

fn print_event(event: &SyncEvent) {
    match event {
        SyncEvent::ToolSynced { key, parameters_changed } => {
            println!("  {} {} ({} changed)", "synced".green(), key, parameters_changed)
        }
        SyncEvent::PresetAdded { key, preset } => println!("  {} {} -> {}", "preset".cyan(), preset, key),
        SyncEvent::ToolCommitted { key } => println!("  {} {}", "saved".dimmed(), key),
        SyncEvent::LibraryCommitted { tools } => println!("  {} library ({} tools)", "saved".dimmed(), tools),
    }
}

fn print_report(report: &SyncReport) {
    println!("{}", report.summary().green());
    for ambiguous in &report.ambiguous_matches {
        println!(
            "{} {} matched several source tools, used {}",
            "Warning:".yellow(),
            ambiguous.tool,
            ambiguous.used
        );
    }
    for failure in &report.commit_failures {
        println!("{} could not save {}: {}", "Error:".red(), failure.tool, failure.reason);
    }
}

fn handle_sync_command(direction: SyncDirection, args: &SyncArgs, verbose: bool, config: &Config) -> Result<()> {
    info!("Handling {} of {}", direction, args.library);

    let document_path = config
        .document
        .as_deref()
        .map(config::expand_home)
        .ok_or_else(|| eyre!("No document library configured; pass --document or set `document` in the config"))?;
    let mut document = JsonLibraryStore::open(&document_path)
        .context(format!("Failed to open document library {}", document_path.display()))?;

    let external_path = resolve_library(&args.library, config)?;
    let mut external = JsonLibraryStore::open(&external_path)
        .context(format!("Failed to open library {}", external_path.display()))?;

    let mut synchronizer = ToolLibrarySynchronizer::new(SyncOptions::from_config(config)).with_observer(|event| {
        if verbose {
            print_event(event);
        }
    });

    let report = match direction {
        SyncDirection::Pull => synchronizer.sync(&external, &mut document, direction),
        SyncDirection::Push => synchronizer.sync(&document, &mut external, direction),
    }
    .context("Sync failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn handle_libraries_command(json: bool, config: &Config) -> Result<()> {
    let discovery = LibraryDiscovery::new(FsLocator::from_config(config)?);
    let entries = discovery.discover()?;
    info!("Listing {} libraries", entries.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    if entries.is_empty() {
        println!("{}", "No libraries found under the configured locations".yellow());
    }
    for entry in &entries {
        println!("{}  {}", entry.display_name.bold(), entry.url.to_string().dimmed());
    }
    Ok(())
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    let overrides = cli
        .command
        .sync_args()
        .map(|(_, args)| args.overrides())
        .unwrap_or_else(ConfigOverrides::none);

    // Load configuration
    let config = config::load_config(cli.config.as_ref(), &overrides).context("Failed to load configuration")?;

    // Setup logging once the configured level is known
    setup_logging(&config).context("Failed to setup logging")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
