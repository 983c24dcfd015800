use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};

use crate::vote_types::VoteType;

/// Seed of the vote bank PDA.
pub const VOTE_BANK_SEED: &[u8] = b"votebank";

pub const INITIALIZE_DISCRIMINANT: u8 = 0;
pub const CAST_VOTE_DISCRIMINANT: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteInstruction {
    Initialize,
    CastVote(VoteType),
}

impl VoteInstruction {
    pub fn data(&self) -> Vec<u8> {
        match self {
            VoteInstruction::Initialize => vec![INITIALIZE_DISCRIMINANT],
            VoteInstruction::CastVote(vote_type) => {
                vec![CAST_VOTE_DISCRIMINANT, vote_type.as_byte()]
            }
        }
    }
}

pub fn vote_bank_address(program_id: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[VOTE_BANK_SEED], program_id).0
}

/// Accounts: vote account (signer, writable), signer (signer, writable), system program.
pub fn initialize_vote_bank(
    program_id: &Pubkey,
    vote_account: &Pubkey,
    signer: &Pubkey,
) -> Instruction {
    Instruction::new_with_bytes(
        *program_id,
        &VoteInstruction::Initialize.data(),
        vec![
            AccountMeta::new(*vote_account, true),
            AccountMeta::new(*signer, true),
            AccountMeta::new_readonly(system_program::ID, false),
        ],
    )
}

/// Accounts: vote account (writable), signer (signer, readonly).
pub fn cast_vote(
    program_id: &Pubkey,
    vote_account: &Pubkey,
    signer: &Pubkey,
    vote_type: VoteType,
) -> Instruction {
    Instruction::new_with_bytes(
        *program_id,
        &VoteInstruction::CastVote(vote_type).data(),
        vec![
            AccountMeta::new(*vote_account, false),
            AccountMeta::new_readonly(*signer, true),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initialize_payload_is_single_zero_byte() {
        let ix = initialize_vote_bank(&crate::ID, &Pubkey::new_unique(), &Pubkey::new_unique());
        assert_eq!(ix.data, vec![0]);
        assert_eq!(ix.program_id, crate::ID);
    }

    #[test]
    fn initialize_account_layout() {
        let vote_account = Pubkey::new_unique();
        let signer = Pubkey::new_unique();
        let ix = initialize_vote_bank(&crate::ID, &vote_account, &signer);

        assert_eq!(
            ix.accounts,
            vec![
                AccountMeta::new(vote_account, true),
                AccountMeta::new(signer, true),
                AccountMeta::new_readonly(system_program::ID, false),
            ]
        );
    }

    #[test]
    fn cast_vote_payload() {
        let vote_account = Pubkey::new_unique();
        let signer = Pubkey::new_unique();

        let agree = cast_vote(&crate::ID, &vote_account, &signer, VoteType::Agree);
        let disagree = cast_vote(&crate::ID, &vote_account, &signer, VoteType::Disagree);
        assert_eq!(agree.data, vec![1, 0]);
        assert_eq!(disagree.data, vec![1, 1]);
    }

    #[test]
    fn cast_vote_account_layout() {
        let vote_account = Pubkey::new_unique();
        let signer = Pubkey::new_unique();
        let ix = cast_vote(&crate::ID, &vote_account, &signer, VoteType::Disagree);

        assert_eq!(ix.accounts.len(), 2);
        let first = &ix.accounts[0];
        assert_eq!(first.pubkey, vote_account);
        assert!(!first.is_signer);
        assert!(first.is_writable);
        let second = &ix.accounts[1];
        assert_eq!(second.pubkey, signer);
        assert!(second.is_signer);
        assert!(!second.is_writable);
    }

    #[test]
    fn vote_bank_address_is_deterministic() {
        let program_id = Pubkey::new_unique();
        let first = vote_bank_address(&program_id);
        assert_eq!(first, vote_bank_address(&program_id));

        let expected = Pubkey::find_program_address(&[b"votebank"], &program_id).0;
        assert_eq!(first, expected);
        assert_ne!(first, vote_bank_address(&Pubkey::new_unique()));
    }
}
