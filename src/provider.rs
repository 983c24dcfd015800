//! Access to the cluster: blockhashes, transaction submission and account reads.

use async_trait::async_trait;
use solana_sdk::{
    account::Account, hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction,
};

use crate::errors::VoteError;

#[cfg(test)]
pub(crate) mod mock;

#[async_trait]
pub trait Provider: Send + Sync {
    /// Blockhash to stamp new transactions with.
    async fn latest_blockhash(&self) -> Result<Hash, VoteError>;

    /// Submits a fully signed transaction and returns its signature.
    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, VoteError>;

    /// Returns `None` when no account exists at `address`.
    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, VoteError>;
}
