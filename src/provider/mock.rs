use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use solana_sdk::{
    account::Account, hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction,
};

use super::Provider;
use crate::{errors::VoteError, state::VoteBank};

/// In-memory cluster used by unit tests.
#[derive(Default)]
pub(crate) struct MockProvider {
    accounts: Mutex<HashMap<Pubkey, Account>>,
    sent: Mutex<Vec<Transaction>>,
    calls: Mutex<usize>,
    send_error: Option<String>,
}

impl MockProvider {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing_sends(reason: &str) -> Self {
        Self {
            send_error: Some(reason.to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn insert_account(&self, address: Pubkey, account: Account) {
        self.accounts.lock().unwrap().insert(address, account);
    }

    pub(crate) fn insert_vote_bank(&self, address: Pubkey, owner: Pubkey, vote_count: u64) {
        let mut data = Vec::new();
        anchor_lang::AccountSerialize::try_serialize(&VoteBank { vote_count }, &mut data).unwrap();
        self.insert_account(
            address,
            Account {
                lamports: 1_000_000,
                data,
                owner,
                executable: false,
                rent_epoch: 0,
            },
        );
    }

    pub(crate) fn sent(&self) -> Vec<Transaction> {
        self.sent.lock().unwrap().clone()
    }

    pub(crate) fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    fn record_call(&self) {
        *self.calls.lock().unwrap() += 1;
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn latest_blockhash(&self) -> Result<Hash, VoteError> {
        self.record_call();
        Ok(Hash::new_unique())
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, VoteError> {
        self.record_call();
        if let Some(reason) = &self.send_error {
            return Err(VoteError::Transport(reason.clone()));
        }
        self.sent.lock().unwrap().push(transaction.clone());
        Ok(transaction.signatures[0])
    }

    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, VoteError> {
        self.record_call();
        Ok(self.accounts.lock().unwrap().get(address).cloned())
    }
}
