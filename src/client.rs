use solana_sdk::{
    instruction::Instruction, pubkey::Pubkey, signature::Signature, transaction::Transaction,
};
use tracing::{debug, info};

use crate::{
    errors::VoteError,
    instructions::{self, vote_bank_address},
    provider::Provider,
    state::VoteBank,
    vote_types::VoteType,
    wallet::Wallet,
};

/// Builds and submits vote program instructions, and reads the vote bank.
pub struct VoteClient<P> {
    provider: P,
    program_id: Pubkey,
}

impl<P: Provider> VoteClient<P> {
    pub fn new(provider: P, program_id: Pubkey) -> Self {
        Self {
            provider,
            program_id,
        }
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    #[cfg(test)]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn vote_bank_address(&self) -> Pubkey {
        vote_bank_address(&self.program_id)
    }

    pub async fn initialize_vote_bank<W: Wallet>(
        &self,
        vote_account: &Pubkey,
        wallet: &W,
    ) -> Result<Signature, VoteError> {
        let ix =
            instructions::initialize_vote_bank(&self.program_id, vote_account, &wallet.pubkey());
        let signature = self.submit(ix, wallet).await?;
        info!("Vote bank initialized with vote account {}", vote_account);
        Ok(signature)
    }

    /// Casts a vote. Fails without sending anything if the vote bank does not
    /// exist yet.
    pub async fn cast_vote<W: Wallet>(
        &self,
        vote_account: &Pubkey,
        wallet: &W,
        vote_type: VoteType,
    ) -> Result<Signature, VoteError> {
        if self.fetch_vote_bank().await?.is_none() {
            return Err(VoteError::VoteBankNotInitialized(self.vote_bank_address()));
        }

        let ix =
            instructions::cast_vote(&self.program_id, vote_account, &wallet.pubkey(), vote_type);
        let signature = self.submit(ix, wallet).await?;
        info!("Vote recorded for {}", vote_type);
        Ok(signature)
    }

    pub async fn fetch_vote_count(&self, vote_account: &Pubkey) -> Result<u64, VoteError> {
        debug!("Fetching vote count for vote account {}", vote_account);
        self.fetch_vote_bank()
            .await?
            .map(|bank| bank.vote_count)
            .ok_or_else(|| VoteError::VoteBankNotInitialized(self.vote_bank_address()))
    }

    /// Reads the vote bank, or `None` if it has not been created.
    pub async fn fetch_vote_bank(&self) -> Result<Option<VoteBank>, VoteError> {
        let address = self.vote_bank_address();
        let Some(account) = self.provider.get_account(&address).await? else {
            debug!("No vote bank at {}", address);
            return Ok(None);
        };

        if account.owner != self.program_id {
            return Err(VoteError::InvalidOwner {
                address,
                owner: account.owner,
                expected: self.program_id,
            });
        }
        VoteBank::decode(&account.data).map(Some)
    }

    async fn submit<W: Wallet>(&self, ix: Instruction, wallet: &W) -> Result<Signature, VoteError> {
        let blockhash = self.provider.latest_blockhash().await?;
        let mut transaction = Transaction::new_with_payer(&[ix], Some(&wallet.pubkey()));
        wallet.sign_transaction(&mut transaction, blockhash)?;
        if !transaction.is_signed() {
            return Err(VoteError::MissingSignature);
        }

        let signature = self.provider.send_transaction(&transaction).await?;
        debug!("Submitted transaction {}", signature);
        Ok(signature)
    }
}
