use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gifshare_lib::bootstrap::{self, WiringMode};
use gifshare_lib::{GifShareService, ShareOutcome};
use gs_core::ports::AppDirsPort;
use gs_platform::app_dirs::DirsAppDirsAdapter;
use tracing::{debug, warn};

#[derive(Parser)]
#[command(name = "gifshare")]
#[command(about = "Hand GIFs to other applications", long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/gifshare/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Use in-memory adapters instead of the real environment
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List installed share targets
    List,
    /// Check whether a target is installed
    Check {
        /// Package / bundle identifier
        identifier: String,
    },
    /// Print the installed version of a target
    Version {
        /// Package / bundle identifier
        identifier: String,
    },
    /// Share a GIF through the share sheet
    Share {
        /// GIF file
        file: PathBuf,
        /// Target identifier; omit to open a chooser
        #[arg(short, long)]
        target: Option<String>,
    },
    /// Share a GIF through the protocol handoff
    Protocol {
        /// GIF file
        file: PathBuf,
        /// App id registered with the protocol target
        #[arg(long)]
        app_id: String,
        /// Destination scene: session, timeline or favorite
        #[arg(short, long)]
        scene: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let app_dirs = DirsAppDirsAdapter::new().get_app_dirs()?;
    bootstrap::tracing::init_tracing_subscriber(Some(&app_dirs.logs_dir))?;

    let config = bootstrap::resolve_config(cli.config, &app_dirs)?;
    debug!(?config, "Configuration loaded");

    let mode = if cli.dry_run {
        WiringMode::DryRun
    } else {
        WiringMode::System
    };
    let (service, janitor) = bootstrap::build_service(&config, mode)?;

    match janitor.run_once().await {
        Ok(removed) => debug!(removed, "Staging sweep finished"),
        Err(err) => warn!(error = %err, "Staging sweep failed"),
    }

    run(&service, cli.command).await
}

async fn run(service: &GifShareService, command: Commands) -> Result<ExitCode> {
    match command {
        Commands::List => {
            for identifier in service.list_installed_targets().await {
                println!("{identifier}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Check { identifier } => {
            let installed = service.is_target_installed(&identifier).await;
            println!("{installed}");
            Ok(if installed {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Version { identifier } => match service.target_version(&identifier).await {
            Some(version) => {
                println!("{version}");
                Ok(ExitCode::SUCCESS)
            }
            None => {
                println!("not installed");
                Ok(ExitCode::FAILURE)
            }
        },
        Commands::Share { file, target } => {
            let gif_data = read_gif(&file).await?;
            let outcome = match target {
                Some(target) => service.share_to_app(&gif_data, &target).await,
                None => service.share_open(&gif_data).await,
            };
            report(&outcome)
        }
        Commands::Protocol {
            file,
            app_id,
            scene,
        } => {
            let gif_data = read_gif(&file).await?;
            let outcome = service
                .share_via_protocol(&gif_data, &app_id, scene.as_deref())
                .await;
            report(&outcome)
        }
    }
}

async fn read_gif(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read GIF: {}", path.display()))
}

fn report(outcome: &ShareOutcome) -> Result<ExitCode> {
    println!("{}", serde_json::to_string_pretty(outcome)?);
    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
