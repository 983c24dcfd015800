use std::{fmt, str::FromStr};

use crate::errors::VoteError;

pub const AGREE_ALIASES: [&str; 2] = ["GM", "AGREE"];

pub const DISAGREE_ALIASES: [&str; 2] = ["GN", "DISAGREE"];

/// The two choices the voting program accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoteType {
    /// "gm"
    Agree,
    /// "gn"
    Disagree,
}

impl VoteType {
    /// Byte sent after the cast-vote discriminant.
    pub fn as_byte(self) -> u8 {
        match self {
            VoteType::Agree => 0,
            VoteType::Disagree => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            VoteType::Agree => "GM",
            VoteType::Disagree => "GN",
        }
    }
}

impl FromStr for VoteType {
    type Err = VoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(VoteError::EmptyVoteType);
        }
        if AGREE_ALIASES.contains(&normalized.as_str()) {
            Ok(VoteType::Agree)
        } else if DISAGREE_ALIASES.contains(&normalized.as_str()) {
            Ok(VoteType::Disagree)
        } else {
            Err(VoteError::InvalidVoteType(s.trim().to_string()))
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
