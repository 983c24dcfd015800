use std::path::PathBuf;

use solana_sdk::pubkey::Pubkey;
use thiserror::*;

#[derive(Debug, Error)]
pub enum VoteError {
    #[error("Wallet not connected")]
    WalletNotConnected,
    #[error("Please provide a valid vote account")]
    MissingVoteAccount,
    #[error("Please enter a vote type")]
    EmptyVoteType,
    #[error("Invalid vote type: {0} (expected GM/agree or GN/disagree)")]
    InvalidVoteType(String),
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("Vote bank {0} has not been initialized")]
    VoteBankNotInitialized(Pubkey),
    #[error("Account {address} is owned by {owner}, expected {expected}")]
    InvalidOwner {
        address: Pubkey,
        owner: Pubkey,
        expected: Pubkey,
    },
    #[error("Failed to decode vote bank: {0}")]
    Decode(String),
    #[error("Transaction is missing a required signature")]
    MissingSignature,
    #[error("Failed to sign transaction: {0}")]
    Signing(String),
    #[error("Failed to read keypair at {path}: {reason}")]
    Keypair { path: PathBuf, reason: String },
    #[error(transparent)]
    Rpc(#[from] jsonrpsee::core::Error),
    #[error("Transport error: {0}")]
    Transport(String),
}

impl VoteError {
    /// Whether the error was raised before anything was sent to the cluster.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            VoteError::WalletNotConnected
                | VoteError::MissingVoteAccount
                | VoteError::EmptyVoteType
                | VoteError::InvalidVoteType(_)
                | VoteError::InvalidAddress(_)
                | VoteError::MissingSignature
        )
    }
}
