use std::{
    env,
    fs::{self, File},
    io::Read,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::Context;
use directories::BaseDirs;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::{errors::VoteError, helpers::parse_optional_address};

const VOTEBANK_CONFIG: &str = "VOTEBANK_CONFIG";

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8899";
pub const DEFAULT_COMMITMENT: &str = "confirmed";

/// Client configuration, usually read from `~/.votebank/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoteConfig {
    /// JSON-RPC endpoint of the cluster.
    pub rpc_url: String,
    /// Address of the voting program.
    pub program_id: String,
    /// Commitment used for reads and preflight.
    pub commitment: String,
    /// Wallet keypair. Defaults to the Solana CLI keypair.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keypair_path: Option<PathBuf>,
    /// Vote account used when none is given on the command line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_account: Option<String>,
}

impl Default for VoteConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            program_id: crate::ID.to_string(),
            commitment: DEFAULT_COMMITMENT.to_string(),
            keypair_path: None,
            vote_account: None,
        }
    }
}

impl VoteConfig {
    /// Loads the config at `path`, or the defaults if the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            from_toml_path(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn program_id(&self) -> Result<Pubkey, VoteError> {
        Pubkey::from_str(self.program_id.trim())
            .map_err(|_| VoteError::InvalidAddress(self.program_id.clone()))
    }

    pub fn vote_account(&self) -> Result<Option<Pubkey>, VoteError> {
        parse_optional_address(self.vote_account.as_deref())
    }

    pub fn keypair_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = &self.keypair_path {
            return Ok(path.clone());
        }
        Ok(home_dir()?.join(".config").join("solana").join("id.json"))
    }
}

/// Where the config lives: the `VOTEBANK_CONFIG` environment variable if set,
/// otherwise `~/.votebank/config.toml`.
pub fn config_path() -> anyhow::Result<PathBuf> {
    if let Ok(val) = env::var(VOTEBANK_CONFIG) {
        return Ok(PathBuf::from(val));
    }
    Ok(home_dir()?.join(".votebank").join("config.toml"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    Ok(BaseDirs::new()
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Could not find home directory. You can set a config path using the {} environment variable",
                VOTEBANK_CONFIG
            )
        })?
        .home_dir()
        .to_path_buf())
}

pub fn from_toml_path<P: AsRef<Path>, R: DeserializeOwned>(path: P) -> anyhow::Result<R> {
    let mut contents = String::new();
    {
        let mut file = File::open(path)?;
        file.read_to_string(&mut contents)?;
    }

    let result: R = toml::from_str(&contents)?;

    Ok(result)
}
