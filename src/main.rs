mod cli;
mod client;
mod config;
mod errors;
mod helpers;
mod instructions;
mod provider;
mod rpc;
mod state;
mod view;
mod vote_types;
mod wallet;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use cli::{build_view, init_config, load_vote_account_keypair, print_address, Overrides};
use config::{config_path, VoteConfig};

anchor_lang::declare_id!("GMgnVote11111111111111111111111111111111111");

#[derive(ClapParser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Config file path (default: $VOTEBANK_CONFIG or ~/.votebank/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// JSON-RPC endpoint, overriding the config file
    #[arg(short = 'u', long, global = true)]
    rpc_url: Option<String>,
    /// Wallet keypair file, overriding the config file
    #[arg(short, long, global = true)]
    keypair: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Writes a default config file
    InitConfig {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
    /// Prints the program id and the derived vote bank address
    Address,
    /// Initializes the vote bank
    Initialize {
        /// Vote account address
        #[arg(long)]
        vote_account: Option<String>,
        /// Keypair of the vote account, when it is not the wallet itself
        #[arg(long)]
        vote_account_keypair: Option<PathBuf>,
    },
    /// Casts a GM (agree) or GN (disagree) vote
    Vote {
        /// gm, gn, agree or disagree
        vote_type: String,
        /// Vote account address
        #[arg(long)]
        vote_account: Option<String>,
    },
    /// Fetches the current vote count
    Count {
        /// Vote account address
        #[arg(long)]
        vote_account: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Unable to set global default subscriber")?;

    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => config_path()?,
    };
    let overrides = |vote_account: Option<String>| Overrides {
        rpc_url: cli.rpc_url.clone(),
        keypair: cli.keypair.clone(),
        vote_account,
    };

    match cli.command {
        Commands::InitConfig { force } => {
            init_config(&config_path, force)?;
        }
        Commands::Address => {
            print_address(&VoteConfig::load(&config_path)?)?;
        }
        Commands::Initialize {
            ref vote_account,
            ref vote_account_keypair,
        } => {
            let co_signer = vote_account_keypair
                .as_deref()
                .map(load_vote_account_keypair)
                .transpose()?;
            // A vote account keypair alone is enough to name the vote account.
            let vote_account = vote_account.clone().or_else(|| {
                co_signer
                    .as_ref()
                    .map(|k| solana_sdk::signer::Signer::pubkey(k).to_string())
            });
            let config = VoteConfig::load(&config_path)?;
            let mut view = build_view(config, overrides(vote_account), co_signer)?;
            cli::run_initialize(&mut view).await?;
        }
        Commands::Vote {
            ref vote_type,
            ref vote_account,
        } => {
            let config = VoteConfig::load(&config_path)?;
            let mut view = build_view(config, overrides(vote_account.clone()), None)?;
            cli::run_vote(&mut view, vote_type).await?;
        }
        Commands::Count { ref vote_account } => {
            let config = VoteConfig::load(&config_path)?;
            let mut view = build_view(config, overrides(vote_account.clone()), None)?;
            cli::run_count(&mut view).await?;
        }
    }

    Ok(())
}
