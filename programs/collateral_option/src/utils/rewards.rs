use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::invoke_signed;

/// Anchor discriminator of the distributor's `claim_rewards` instruction,
/// i.e. `sha256("global:claim_rewards")[..8]`.
pub const CLAIM_REWARDS_DISCRIMINATOR: [u8; 8] = [4, 144, 132, 71, 116, 23, 151, 80];

/// Accounts handed to the external reward distributor.
pub struct ClaimRewards<'info> {
    pub distributor_program: AccountInfo<'info>,
    pub distributor_state: AccountInfo<'info>,
    pub distributor_vault: AccountInfo<'info>,
    pub reward_vault: AccountInfo<'info>,
    pub series: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
}

fn claim_rewards_instruction(accounts: &ClaimRewards) -> Instruction {
    Instruction {
        program_id: accounts.distributor_program.key(),
        accounts: vec![
            AccountMeta::new(accounts.distributor_state.key(), false),
            AccountMeta::new(accounts.distributor_vault.key(), false),
            AccountMeta::new(accounts.reward_vault.key(), false),
            AccountMeta::new_readonly(accounts.series.key(), true),
            AccountMeta::new_readonly(accounts.token_program.key(), false),
        ],
        data: CLAIM_REWARDS_DISCRIMINATOR.to_vec(),
    }
}

/// Asks the distributor to move everything accrued for the series into its
/// reward vault. The series PDA signs as the reward owner.
pub fn claim_rewards(accounts: &ClaimRewards, signer_seeds: &[&[&[u8]]]) -> Result<()> {
    invoke_signed(
        &claim_rewards_instruction(accounts),
        &[
            accounts.distributor_state.clone(),
            accounts.distributor_vault.clone(),
            accounts.reward_vault.clone(),
            accounts.series.clone(),
            accounts.token_program.clone(),
            accounts.distributor_program.clone(),
        ],
        signer_seeds,
    )?;
    Ok(())
}
