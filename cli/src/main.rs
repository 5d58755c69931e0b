//! statusdeck - advisory condition dashboard over a persisted registry.
//!
//! The binary owns the host side of the contract: it samples (or, here,
//! accepts on the command line) a system snapshot, feeds it to the
//! registry and renders the resulting condition rows.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::EnvFilter;

use statusdeck_core::{ConditionListener, ConditionRegistry, StateStore, default_store_path};
use statusdeck_types::SystemSnapshot;

#[derive(Parser)]
#[command(version, about = "Advisory system condition dashboard")]
struct Cli {
    /// Override the condition state file location
    #[arg(long, value_name = "PATH")]
    state_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every condition with its current state (default)
    Show,
    /// Feed a host snapshot to the registry, then print the new state
    Refresh(SnapshotArgs),
    /// Delete the persisted state file
    Reset,
}

#[derive(Args, Default)]
struct SnapshotArgs {
    #[arg(long)]
    airplane_mode: bool,
    #[arg(long)]
    hotspot: bool,
    #[arg(long)]
    dnd: bool,
    #[arg(long, requires = "dnd")]
    total_silence: bool,
    #[arg(long)]
    battery_saver: bool,
    #[arg(long)]
    cellular_data_off: bool,
    #[arg(long)]
    background_data_restricted: bool,
    #[arg(long)]
    work_mode_paused: bool,
}

impl SnapshotArgs {
    fn to_snapshot(&self) -> SystemSnapshot {
        SystemSnapshot {
            airplane_mode_on: self.airplane_mode,
            hotspot_on: self.hotspot,
            dnd_on: self.dnd,
            dnd_total_silence: self.total_silence,
            battery_saver_on: self.battery_saver,
            cellular_data_off: self.cellular_data_off,
            background_data_restricted: self.background_data_restricted,
            work_mode_paused: self.work_mode_paused,
        }
    }
}

/// Host settings persisted via confy (TOML under the user config dir).
#[derive(Serialize, Deserialize, Default)]
struct HostConfig {
    /// Optional state file override; flags still take precedence
    state_file: Option<PathBuf>,
}

struct ChangeLogger;

impl ConditionListener for ChangeLogger {
    fn on_conditions_changed(&self) {
        tracing::info!("conditions changed");
    }
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let config: HostConfig = confy::load("statusdeck", None).unwrap_or_default();
    let state_file = cli
        .state_file
        .or(config.state_file)
        .or_else(default_store_path)
        .unwrap_or_else(|| PathBuf::from("condition_state.json"));

    match cli.command.unwrap_or(Commands::Show) {
        Commands::Show => {
            let registry = ConditionRegistry::new(state_file);
            print_conditions(&registry);
        }
        Commands::Refresh(args) => {
            let mut registry = ConditionRegistry::new(state_file);
            let logger: Arc<dyn ConditionListener> = Arc::new(ChangeLogger);
            registry.add_listener(&logger);
            registry.refresh_all(&args.to_snapshot());
            print_conditions(&registry);
        }
        Commands::Reset => match StateStore::new(&state_file).clear() {
            Ok(()) => println!("cleared {}", state_file.display()),
            Err(e) => eprintln!("failed to clear {}: {e}", state_file.display()),
        },
    }
}

fn print_conditions(registry: &ConditionRegistry) {
    for row in registry.snapshot() {
        println!(
            "{:<16} {:<8} last_change={}",
            row.kind.display_name(),
            if row.visible { "ACTIVE" } else { "-" },
            row.last_change,
        );
    }
}

/// Initialize logging, writing to STATUSDECK_LOG_PATH if set, otherwise stderr.
fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    if let Ok(path) = std::env::var("STATUSDECK_LOG_PATH") {
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
        {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(file)
                .init();
            return;
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
