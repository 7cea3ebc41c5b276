//! # MailBlast — self-hosted email outreach server
//!
//! Loads config, wires the snapshot store, mailer, and campaign engine
//! together, and serves the dashboard.
//!
//! Usage:
//!   mailblast                      # serve with ~/.mailblast/config.toml
//!   mailblast --port 8080          # override the dashboard port
//!   mailblast --data-dir ./data    # override the snapshot directory

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mailblast_campaign::{spawn_campaign, FileStore, SqliteStore};
use mailblast_core::traits::SnapshotStore;
use mailblast_core::MailblastConfig;
use mailblast_gateway::AppState;

#[derive(Parser)]
#[command(name = "mailblast", version, about = "📨 MailBlast — email outreach dashboard")]
struct Cli {
    /// Path to config.toml (default: ~/.mailblast/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dashboard bind host
    #[arg(long)]
    host: Option<String>,

    /// Dashboard port
    #[arg(short, long)]
    port: Option<u16>,

    /// Snapshot data directory
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn expand_path(p: &str) -> PathBuf {
    if let Some(rest) = p.strip_prefix("~/") {
        return dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(rest);
    }
    PathBuf::from(p)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "mailblast=debug,tower_http=debug"
    } else {
        "mailblast=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let mut config = match &cli.config {
        Some(path) => MailblastConfig::load_from(path)?,
        None => MailblastConfig::load()?,
    };
    if let Some(host) = cli.host {
        config.dashboard.host = host;
    }
    if let Some(port) = cli.port {
        config.dashboard.port = port;
    }
    if let Some(data_dir) = &cli.data_dir {
        config.storage.data_dir = data_dir.display().to_string();
    }

    let data_dir = expand_path(&config.storage.data_dir);
    let store: Arc<dyn SnapshotStore> = match config.storage.backend.as_str() {
        "sqlite" => {
            std::fs::create_dir_all(&data_dir)?;
            Arc::new(SqliteStore::open(&data_dir.join("mailblast.db"))?)
        }
        _ => Arc::new(FileStore::new(&data_dir)),
    };

    let mailer = mailblast_delivery::mailer_from_config(&config.delivery)?;
    tracing::info!("📮 Delivery backend: {}", mailer.name());

    // Spawning also auto-resumes a campaign persisted as running
    let campaign = spawn_campaign(store, mailer);

    println!("📨 MailBlast v{}", env!("CARGO_PKG_VERSION"));
    println!(
        "   🌐 Dashboard:  http://{}:{}",
        config.dashboard.host, config.dashboard.port
    );
    println!("   📂 Data dir:   {}", data_dir.display());
    println!("   📮 Delivery:   {}", config.delivery.provider);
    println!("   👤 Login:      {} (change the default password!)", config.dashboard.username);
    println!();

    let state = Arc::new(AppState::new(config, campaign));
    mailblast_gateway::start(state).await?;
    Ok(())
}
