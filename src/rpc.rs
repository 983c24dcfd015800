//! Solana JSON-RPC provider over HTTP.

use std::str::FromStr;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use jsonrpsee::core::client::ClientT;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::rpc_params;
use serde::Deserialize;
use serde_json::json;
use solana_sdk::{
    account::Account, hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction,
};
use tracing::{debug, info};

use crate::{errors::VoteError, provider::Provider};

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcBlockhash {
    blockhash: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RpcAccount {
    lamports: u64,
    /// `[payload, encoding]`
    data: (String, String),
    owner: String,
    executable: bool,
    rent_epoch: u64,
}

impl RpcAccount {
    fn into_account(self) -> Result<Account, VoteError> {
        let (payload, encoding) = self.data;
        if encoding != "base64" {
            return Err(VoteError::Decode(format!("unexpected account encoding {encoding}")));
        }
        let data = STANDARD
            .decode(payload)
            .map_err(|e| VoteError::Decode(e.to_string()))?;
        let owner = Pubkey::from_str(&self.owner)
            .map_err(|_| VoteError::InvalidAddress(self.owner.clone()))?;

        Ok(Account {
            lamports: self.lamports,
            data,
            owner,
            executable: self.executable,
            rent_epoch: self.rent_epoch,
        })
    }
}

/// A simple client for a Solana RPC node.
pub struct RpcProvider {
    client: HttpClient,
    commitment: String,
}

impl RpcProvider {
    /// Creates a new client at the given endpoint
    pub fn new(endpoint: &str, commitment: &str) -> Result<Self, VoteError> {
        let client = HttpClientBuilder::default().build(endpoint)?;
        info!("Using rpc endpoint {} ({})", endpoint, commitment);
        Ok(Self {
            client,
            commitment: commitment.to_string(),
        })
    }
}

#[async_trait]
impl Provider for RpcProvider {
    async fn latest_blockhash(&self) -> Result<Hash, VoteError> {
        let response: RpcResponse<RpcBlockhash> = self
            .client
            .request(
                "getLatestBlockhash",
                rpc_params![json!({ "commitment": self.commitment })],
            )
            .await?;
        Hash::from_str(&response.value.blockhash)
            .map_err(|e| VoteError::Transport(format!("bad blockhash from node: {e}")))
    }

    async fn send_transaction(&self, transaction: &Transaction) -> Result<Signature, VoteError> {
        let wire = bincode::serialize(transaction)
            .map_err(|e| VoteError::Transport(format!("failed to serialize transaction: {e}")))?;
        debug!("Sending transaction ({} bytes)", wire.len());

        let signature: String = self
            .client
            .request(
                "sendTransaction",
                rpc_params![
                    STANDARD.encode(wire),
                    json!({ "encoding": "base64", "preflightCommitment": self.commitment })
                ],
            )
            .await?;
        Signature::from_str(&signature)
            .map_err(|e| VoteError::Transport(format!("bad signature from node: {e}")))
    }

    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, VoteError> {
        let response: RpcResponse<Option<RpcAccount>> = self
            .client
            .request(
                "getAccountInfo",
                rpc_params![
                    address.to_string(),
                    json!({ "encoding": "base64", "commitment": self.commitment })
                ],
            )
            .await?;
        response.value.map(RpcAccount::into_account).transpose()
    }
}
