use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use solana_sdk::{
    signature::{read_keypair_file, Keypair},
    signer::Signer,
};
use tracing::{info, warn};

use crate::{
    client::VoteClient,
    config::VoteConfig,
    helpers::parse_optional_address,
    instructions::vote_bank_address,
    provider::Provider,
    rpc::RpcProvider,
    view::VoteView,
    wallet::{KeypairWallet, Wallet},
};

pub type CliView = VoteView<RpcProvider, KeypairWallet>;

/// Values given on the command line that take precedence over the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub rpc_url: Option<String>,
    pub keypair: Option<PathBuf>,
    pub vote_account: Option<String>,
}

pub fn init_config(path: &Path, force: bool) -> Result<()> {
    println!("Initializing config: {}", path.display());

    if path.exists() && !force {
        println!("Config already exists. Pass --force to overwrite it.");
        return Ok(());
    }

    VoteConfig::default()
        .save(path)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    println!(
        "\n\nSetup successful!\n\nEdit {} to point at your cluster and vote account.",
        path.display()
    );
    Ok(())
}

pub fn print_address(config: &VoteConfig) -> Result<()> {
    let program_id = config.program_id()?;
    println!("Program:   {}", program_id);
    println!("Vote bank: {}", vote_bank_address(&program_id));
    Ok(())
}

/// Builds the view, connecting the wallet when a keypair file is available.
pub fn build_view(
    mut config: VoteConfig,
    overrides: Overrides,
    co_signer: Option<Keypair>,
) -> Result<CliView> {
    if let Some(rpc_url) = overrides.rpc_url {
        config.rpc_url = rpc_url;
    }
    if let Some(keypair) = overrides.keypair {
        config.keypair_path = Some(keypair);
    }

    let provider = RpcProvider::new(&config.rpc_url, &config.commitment)?;
    let client = VoteClient::new(provider, config.program_id()?);

    let keypair_path = config.keypair_path()?;
    let wallet = if keypair_path.exists() {
        let wallet = KeypairWallet::from_file(&keypair_path)?;
        let wallet = match co_signer {
            Some(keypair) => wallet.with_co_signer(keypair),
            None => wallet,
        };
        Some(wallet)
    } else {
        warn!("No keypair at {}; wallet not connected", keypair_path.display());
        None
    };

    let vote_account = match parse_optional_address(overrides.vote_account.as_deref())? {
        Some(vote_account) => Some(vote_account),
        None => config.vote_account()?,
    };

    Ok(VoteView::new(client, wallet, vote_account))
}

/// Loads the keypair of a vote account that must sign its own initialization.
pub fn load_vote_account_keypair(path: &Path) -> Result<Keypair> {
    let keypair = read_keypair_file(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read vote account keypair {}: {}",
            path.display(),
            e
        )
    })?;
    info!("Vote account {} will co-sign", keypair.pubkey());
    Ok(keypair)
}

pub async fn run_initialize<P: Provider, W: Wallet>(view: &mut VoteView<P, W>) -> Result<()> {
    if let Some(vote_account) = view.vote_account() {
        println!("Vote account: {}", vote_account);
    }
    let outcome = view.on_initialize_click().await;
    println!("Status: {}", view.status());
    outcome?;
    println!(
        "Vote bank {} initialized for program {}",
        view.client().vote_bank_address(),
        view.client().program_id()
    );
    Ok(())
}

pub async fn run_vote<P: Provider, W: Wallet>(
    view: &mut VoteView<P, W>,
    vote_type: &str,
) -> Result<()> {
    view.set_vote_type(vote_type);
    println!("{}", view.submit_label());
    let outcome = view.on_vote_click().await;
    println!("Status: {}", view.status());
    outcome?;
    Ok(())
}

pub async fn run_count<P: Provider, W: Wallet>(view: &mut VoteView<P, W>) -> Result<()> {
    if let Some(vote_account) = view.vote_account() {
        println!("Vote account: {}", vote_account);
    }
    let outcome = view.on_fetch_count_click().await;
    println!("Status: {}", view.status());
    outcome?;
    println!("Vote count: {}", view.vote_count_display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use solana_sdk::{pubkey::Pubkey, signature::write_keypair_file};

    use super::*;
    use crate::{errors::VoteError, provider::mock::MockProvider, view::ViewStatus};

    fn mock_view(
        bank_owner: Option<Pubkey>,
        vote_account: Option<Pubkey>,
    ) -> VoteView<MockProvider, KeypairWallet> {
        let client = VoteClient::new(MockProvider::new(), crate::ID);
        if let Some(owner) = bank_owner {
            client
                .provider()
                .insert_vote_bank(client.vote_bank_address(), owner, 7);
        }
        VoteView::new(client, Some(KeypairWallet::new(Keypair::new())), vote_account)
    }

    #[test]
    fn init_config_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        init_config(&path, false).unwrap();
        assert_eq!(VoteConfig::load(&path).unwrap(), VoteConfig::default());

        std::fs::write(&path, "rpc_url = \"http://localhost:1\"\n").unwrap();
        init_config(&path, false).unwrap();
        assert_eq!(VoteConfig::load(&path).unwrap().rpc_url, "http://localhost:1");

        init_config(&path, true).unwrap();
        assert_eq!(VoteConfig::load(&path).unwrap(), VoteConfig::default());
    }

    #[tokio::test]
    async fn missing_keypair_leaves_wallet_disconnected() {
        let dir = tempfile::tempdir().unwrap();
        let overrides = Overrides {
            keypair: Some(dir.path().join("absent.json")),
            ..Overrides::default()
        };

        let view = build_view(VoteConfig::default(), overrides, None).unwrap();
        assert!(!view.submit_enabled());
    }

    #[tokio::test]
    async fn command_line_vote_account_wins() {
        let dir = tempfile::tempdir().unwrap();
        let keypair_path = dir.path().join("id.json");
        write_keypair_file(&Keypair::new(), &keypair_path).unwrap();

        let config = VoteConfig {
            vote_account: Some(Pubkey::new_unique().to_string()),
            ..VoteConfig::default()
        };
        let overrides = Overrides {
            rpc_url: Some("http://127.0.0.1:18899".to_string()),
            keypair: Some(keypair_path),
            vote_account: Some("Acct1".to_string()),
        };

        // "Acct1" is not base58
        assert!(build_view(config.clone(), overrides.clone(), None).is_err());

        let vote_account = Pubkey::new_unique();
        let overrides = Overrides {
            vote_account: Some(vote_account.to_string()),
            ..overrides
        };
        let view = build_view(config, overrides, None).unwrap();
        assert!(view.submit_enabled());
        assert_eq!(view.vote_account(), Some(&vote_account));
    }

    #[tokio::test]
    async fn run_vote_leaves_submitted_status() {
        let mut view = mock_view(Some(crate::ID), Some(Pubkey::new_unique()));

        run_vote(&mut view, "gm").await.unwrap();
        assert!(matches!(view.status(), ViewStatus::Submitted(_)));
        assert_eq!(view.client().provider().sent().len(), 1);
    }

    #[tokio::test]
    async fn run_vote_surfaces_failure_status() {
        let mut view = mock_view(None, Some(Pubkey::new_unique()));

        let err = run_vote(&mut view, "gn").await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<VoteError>(),
            Some(VoteError::VoteBankNotInitialized(_))
        ));
        match view.status() {
            ViewStatus::Failed(msg) => assert!(msg.contains("not been initialized"), "{msg}"),
            other => panic!("unexpected status: {other}"),
        }
        assert!(view.client().provider().sent().is_empty());
    }

    #[tokio::test]
    async fn run_count_reports_count() {
        let mut view = mock_view(Some(crate::ID), Some(Pubkey::new_unique()));

        run_count(&mut view).await.unwrap();
        assert_eq!(view.status(), &ViewStatus::Fetched(7));
        assert_eq!(view.vote_count_display(), "7");
    }

    #[tokio::test]
    async fn run_initialize_without_vote_account_fails() {
        let mut view = mock_view(None, None);

        assert!(run_initialize(&mut view).await.is_err());
        assert_eq!(
            view.status(),
            &ViewStatus::Failed("Please provide a valid vote account".to_string())
        );
        assert_eq!(view.client().provider().calls(), 0);
    }
}
