use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wheelwright_core::AppConfig;

mod commands;

#[derive(Parser)]
#[command(name = "wheelwright")]
#[command(author, version, about = "A terminal page reader with per-site scroll rescaling")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a web page in the terminal
    View {
        /// Page URL (https is assumed when no scheme is given)
        url: String,
    },
    /// Interactive settings panel for the active page
    Panel {
        /// Configure this hostname instead of the active page's
        #[arg(short, long)]
        site: Option<String>,
    },
    /// Manage per-site enablement
    Sites {
        #[command(subcommand)]
        action: SitesAction,
    },
    /// Reset speed and smoothing preferences, keeping enabled sites
    Reset,
}

#[derive(Subcommand)]
enum SitesAction {
    /// List sites with rescaling enabled
    List,
    /// Enable rescaling for a hostname
    Enable { hostname: String },
    /// Disable rescaling for a hostname
    Disable { hostname: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    // TUI surfaces own the terminal, so their logs go to a file
    let to_file = matches!(
        cli.command,
        Some(Commands::View { .. }) | Some(Commands::Panel { .. }) | None
    );
    init_logging(&config, to_file)?;

    // Handle commands; bare invocation opens the settings panel
    match cli.command {
        Some(Commands::View { url }) => commands::view::run(config, &url).await,
        Some(Commands::Panel { site }) => commands::panel::run(config, site).await,
        None => commands::panel::run(config, None).await,
        Some(Commands::Sites { action }) => match action {
            SitesAction::List => commands::sites::list(&config).await,
            SitesAction::Enable { hostname } => commands::sites::enable(&config, &hostname).await,
            SitesAction::Disable { hostname } => {
                commands::sites::disable(&config, &hostname).await
            }
        },
        Some(Commands::Reset) => commands::reset::run(&config).await,
    }
}

fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );

    if to_file {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Arc::new(file)),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init();
    }

    Ok(())
}
