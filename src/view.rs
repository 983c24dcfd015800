//! Form state behind the `vote` and `count` commands: a vote type input, a
//! read-only vote count field and the last action's outcome.

use std::fmt;

use solana_sdk::{pubkey::Pubkey, signature::Signature};
use tracing::{error, warn};

use crate::{
    client::VoteClient, errors::VoteError, provider::Provider, vote_types::VoteType, wallet::Wallet,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    Idle,
    Submitted(Signature),
    Fetched(u64),
    Failed(String),
}

impl fmt::Display for ViewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewStatus::Idle => write!(f, "idle"),
            ViewStatus::Submitted(signature) => write!(f, "submitted {}", signature),
            ViewStatus::Fetched(count) => write!(f, "fetched vote count {}", count),
            ViewStatus::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

pub struct VoteView<P, W> {
    client: VoteClient<P>,
    wallet: Option<W>,
    vote_account: Option<Pubkey>,
    vote_type: String,
    vote_count: Option<u64>,
    status: ViewStatus,
}

impl<P: Provider, W: Wallet> VoteView<P, W> {
    pub fn new(client: VoteClient<P>, wallet: Option<W>, vote_account: Option<Pubkey>) -> Self {
        Self {
            client,
            wallet,
            vote_account,
            vote_type: String::new(),
            vote_count: None,
            status: ViewStatus::Idle,
        }
    }

    pub fn client(&self) -> &VoteClient<P> {
        &self.client
    }

    pub fn vote_account(&self) -> Option<&Pubkey> {
        self.vote_account.as_ref()
    }

    pub fn set_vote_type(&mut self, input: impl Into<String>) {
        self.vote_type = input.into();
    }

    pub fn vote_count_display(&self) -> String {
        self.vote_count.map(|c| c.to_string()).unwrap_or_default()
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    pub fn submit_enabled(&self) -> bool {
        self.wallet.is_some()
    }

    pub fn submit_label(&self) -> String {
        if self.submit_enabled() {
            format!("Gib {} vote", self.vote_type.to_uppercase())
        } else {
            "Connect Wallet to Vote".to_string()
        }
    }

    pub async fn on_vote_click(&mut self) -> Result<Signature, VoteError> {
        let result = self.vote().await;
        self.record(result, ViewStatus::Submitted)
    }

    pub async fn on_fetch_count_click(&mut self) -> Result<u64, VoteError> {
        let result = match self.vote_account {
            Some(vote_account) => self.client.fetch_vote_count(&vote_account).await,
            None => Err(VoteError::MissingVoteAccount),
        };
        if let Ok(count) = &result {
            self.vote_count = Some(*count);
        }
        self.record(result, ViewStatus::Fetched)
    }

    pub async fn on_initialize_click(&mut self) -> Result<Signature, VoteError> {
        let result = match (&self.wallet, self.vote_account) {
            (None, _) => Err(VoteError::WalletNotConnected),
            (Some(_), None) => Err(VoteError::MissingVoteAccount),
            (Some(wallet), Some(vote_account)) => {
                self.client.initialize_vote_bank(&vote_account, wallet).await
            }
        };
        self.record(result, ViewStatus::Submitted)
    }

    async fn vote(&self) -> Result<Signature, VoteError> {
        let wallet = self.wallet.as_ref().ok_or(VoteError::WalletNotConnected)?;
        let vote_account = self.vote_account.ok_or(VoteError::MissingVoteAccount)?;
        let vote_type: VoteType = self.vote_type.to_uppercase().parse()?;

        self.client.cast_vote(&vote_account, wallet, vote_type).await
    }

    fn record<T: Copy>(
        &mut self,
        result: Result<T, VoteError>,
        on_success: impl FnOnce(T) -> ViewStatus,
    ) -> Result<T, VoteError> {
        match &result {
            Ok(value) => self.status = on_success(*value),
            Err(e) => {
                if e.is_precondition() {
                    warn!("{}", e);
                } else {
                    error!("{}", e);
                }
                self.status = ViewStatus::Failed(e.to_string());
            }
        }
        result
    }
}
