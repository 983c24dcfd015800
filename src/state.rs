use anchor_lang::prelude::*;

/// Aggregate tally stored at the vote bank PDA.
#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct VoteBank {
    pub vote_count: u64,
}

impl VoteBank {
    /// Decodes account data, checking the 8-byte account discriminator.
    pub fn decode(data: &[u8]) -> std::result::Result<Self, crate::errors::VoteError> {
        let mut data = data;
        VoteBank::try_deserialize(&mut data)
            .map_err(|e| crate::errors::VoteError::Decode(e.to_string()))
    }
}
