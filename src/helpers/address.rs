use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use solana_sdk::pubkey::Pubkey;

use crate::errors::VoteError;

static BASE58_ADDRESS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[1-9A-HJ-NP-Za-km-z]{32,44}$").expect("valid address pattern"));

/// Parses a user supplied address. Empty input means no vote account was given.
///
/// `Pubkey::from_str` would reject the same inputs; the pattern check runs first
/// so that out-of-alphabet or wrong-length input is always reported as
/// [`VoteError::InvalidAddress`] with the offending text.
pub fn parse_address(input: &str) -> Result<Pubkey, VoteError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(VoteError::MissingVoteAccount);
    }
    if !BASE58_ADDRESS.is_match(input) {
        return Err(VoteError::InvalidAddress(input.to_string()));
    }
    Pubkey::from_str(input).map_err(|_| VoteError::InvalidAddress(input.to_string()))
}

/// Like [`parse_address`], treating empty input as absent.
pub fn parse_optional_address(input: Option<&str>) -> Result<Option<Pubkey>, VoteError> {
    match input.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_address(s).map(Some),
    }
}
