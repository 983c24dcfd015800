use std::path::Path;

use solana_sdk::{
    hash::Hash,
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair},
    signer::Signer,
    transaction::Transaction,
};
use tracing::debug;

use crate::errors::VoteError;

/// Something able to sign transactions for a single fee payer.
pub trait Wallet: Send + Sync {
    fn pubkey(&self) -> Pubkey;

    /// Signs with every key the wallet holds that the transaction requires.
    fn sign_transaction(
        &self,
        transaction: &mut Transaction,
        blockhash: Hash,
    ) -> Result<(), VoteError>;
}

/// A wallet backed by keypairs held in memory, usually loaded from the
/// Solana CLI keypair file.
pub struct KeypairWallet {
    keypair: Keypair,
    co_signers: Vec<Keypair>,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self {
            keypair,
            co_signers: vec![],
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, VoteError> {
        let path = path.as_ref();
        let keypair = read_keypair_file(path).map_err(|e| VoteError::Keypair {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        debug!("Loaded wallet {} from {}", keypair.pubkey(), path.display());
        Ok(Self::new(keypair))
    }

    /// Adds a key that signs only when a transaction requires it, such as a
    /// fresh vote account.
    pub fn with_co_signer(mut self, keypair: Keypair) -> Self {
        self.co_signers.push(keypair);
        self
    }
}

impl Wallet for KeypairWallet {
    fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    fn sign_transaction(
        &self,
        transaction: &mut Transaction,
        blockhash: Hash,
    ) -> Result<(), VoteError> {
        let required = transaction.message.header.num_required_signatures as usize;
        let required_keys = &transaction.message.account_keys[..required];

        let mut signers: Vec<&Keypair> = vec![&self.keypair];
        signers.extend(self.co_signers.iter().filter(|k| {
            required_keys.contains(&k.pubkey()) && k.pubkey() != self.keypair.pubkey()
        }));

        transaction
            .try_partial_sign(signers.as_slice(), blockhash)
            .map_err(|e| VoteError::Signing(e.to_string()))
    }
}
