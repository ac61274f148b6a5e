//! HOT claim scheduler.
//!
//! Runs a fleet of independent NEAR accounts that each periodically submit
//! a `claim` call to `game.hot.tg`, report live status, and recover from
//! transient RPC failures indefinitely.
//!
//! # Architecture Overview
//!
//! ```text
//!  accounts file ──▶ config loader ──▶ WorkerSupervisor
//!                                          │  one task per account
//!                                          ▼
//!                                     ClaimWorker ──▶ NearAccount ──▶ JSON-RPC
//!                                          │
//!                                          ▼
//!                                     StatusBoard (terminal)
//! ```
//!
//! Workers never terminate on their own; Ctrl-C is the only shutdown path.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hot_claimer::blockchain::account::{AccountClient, AuthFailed, NearAccount};
use hot_claimer::config::{self, AccountCredential};
use hot_claimer::lifecycle::Shutdown;
use hot_claimer::scheduler::WorkerSupervisor;
use hot_claimer::status::StatusBoard;

#[derive(Parser)]
#[command(name = "hot-claimer")]
#[command(about = "Periodic claim scheduler for a fleet of NEAR accounts", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "claimer.toml")]
    config: PathBuf,

    /// Accounts file path; overrides the config file.
    #[arg(long)]
    accounts: Option<PathBuf>,

    /// RPC endpoint; overrides the config file.
    #[arg(long)]
    rpc_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hot_claimer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("hot-claimer v0.1.0 starting");

    let cli = Cli::parse();

    let mut cfg = if cli.config.exists() {
        config::load_config(&cli.config)?
    } else {
        tracing::info!(path = %cli.config.display(), "config file not found, using defaults");
        config::ClaimerConfig::default()
    };
    if let Some(rpc_url) = cli.rpc_url {
        cfg.rpc.url = rpc_url;
    }

    let accounts_path = cli
        .accounts
        .unwrap_or_else(|| PathBuf::from(&cfg.accounts_file));
    let accounts = config::load_accounts(&accounts_path)?;
    if accounts.is_empty() {
        return Err(format!("no accounts configured in {}", accounts_path.display()).into());
    }

    tracing::info!(
        rpc_url = %cfg.rpc.url,
        contract = %cfg.contract.account_id,
        accounts = accounts.len(),
        "configuration loaded"
    );

    let shutdown = Shutdown::new();

    let board = StatusBoard::new(cfg.board.clone());
    tokio::spawn(board.clone().run(shutdown.subscribe()));

    let rpc_config = cfg.rpc.clone();
    let contract = cfg.contract.clone();
    let make_client = move |credential: &AccountCredential| -> Arc<dyn AccountClient> {
        match NearAccount::connect(credential, &rpc_config, contract.clone()) {
            Ok(account) => Arc::new(account),
            Err(err) => {
                tracing::warn!(
                    account = %credential.account_id,
                    error = %err,
                    "account failed to authenticate, worker will keep reporting it"
                );
                Arc::new(AuthFailed::new(err.to_string()))
            }
        }
    };

    let supervisor = WorkerSupervisor::spawn(accounts, board, &shutdown, make_client);
    tracing::info!(workers = supervisor.worker_count(), "all workers running");

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown signal received");
    shutdown.trigger();

    Ok(())
}
