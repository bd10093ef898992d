use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, TokenAccount};

use crate::custody::{Custody, TokenCustody};
use crate::errors::ErrorCode;
use crate::events::RewardsClaimed;
use crate::instructions::common::Legs;
// generated client modules of the nested WriterContext
use crate::instructions::*;
use crate::settlement;
use crate::state::{OptionSeries, SeriesGuard, WriterPosition};
use crate::utils::rewards::{claim_rewards, ClaimRewards};
use crate::utils::SeriesSeeds;

/// Reward side of a YieldBearing series. Addresses are checked against the
/// series record in the handler.
#[derive(Accounts)]
pub struct RewardAccounts<'info> {
    pub reward_mint: Box<Account<'info, Mint>>,

    #[account(mut)]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = writer_reward_account.mint == reward_mint.key() @ ErrorCode::InvalidTokenAccount,
    )]
    pub writer_reward_account: Box<Account<'info, TokenAccount>>,

    /// CHECK: must equal `series.reward_distributor`
    #[account(executable)]
    pub distributor_program: UncheckedAccount<'info>,

    /// CHECK: owned and validated by the distributor program
    #[account(mut)]
    pub distributor_state: UncheckedAccount<'info>,

    /// CHECK: owned and validated by the distributor program
    #[account(mut)]
    pub distributor_vault: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct WriterRewardContext<'info> {
    pub base: WriterContext<'info>,
    pub rewards: RewardAccounts<'info>,
}

/// Checks run before the distributor is called. A stopped series fails here
/// so the harvest CPI never runs for an instruction that would be rejected.
pub(crate) fn check_reward_accounts(
    series: &OptionSeries,
    guard: &SeriesGuard,
    reward_mint: Pubkey,
    reward_vault: Pubkey,
    distributor_program: Pubkey,
) -> Result<()> {
    guard.require_not_stopped()?;
    require!(series.rewards_configured(), ErrorCode::RewardsNotConfigured);
    require_keys_eq!(reward_vault, series.reward_vault, ErrorCode::InvalidVault);
    require_keys_eq!(reward_mint, series.reward_mint, ErrorCode::InvalidTokenAccount);
    require_keys_eq!(
        distributor_program,
        series.reward_distributor,
        ErrorCode::InvalidRewardDistributor
    );
    Ok(())
}

impl<'info> WriterRewardContext<'info> {
    fn validate(&self) -> Result<()> {
        check_reward_accounts(
            &self.base.series,
            &self.base.guard,
            self.rewards.reward_mint.key(),
            self.rewards.reward_vault.key(),
            self.rewards.distributor_program.key(),
        )
    }

    /// Pulls accrued rewards into the series vault and returns its new balance.
    fn harvest(&mut self) -> Result<u64> {
        let series_seeds = SeriesSeeds::new(&self.base.series);
        let seeds = series_seeds.as_seeds();
        let signer: &[&[&[u8]]] = &[&seeds];
        claim_rewards(
            &ClaimRewards {
                distributor_program: self.rewards.distributor_program.to_account_info(),
                distributor_state: self.rewards.distributor_state.to_account_info(),
                distributor_vault: self.rewards.distributor_vault.to_account_info(),
                reward_vault: self.rewards.reward_vault.to_account_info(),
                series: self.base.series.to_account_info(),
                token_program: self.base.token_program.to_account_info(),
            },
            signer,
        )?;

        self.rewards.reward_vault.reload()?;
        Ok(self.rewards.reward_vault.amount)
    }

    fn pay_reward(&self, amount: u64) -> Result<()> {
        let series_seeds = SeriesSeeds::new(&self.base.series);
        let seeds = series_seeds.as_seeds();
        let signer: &[&[&[u8]]] = &[&seeds];
        let custody = TokenCustody {
            vault: &self.rewards.reward_vault,
            mint: &self.rewards.reward_mint,
            series: self.base.series.to_account_info(),
            token_program: self.base.token_program.to_account_info(),
        };
        custody.release(
            &self.rewards.writer_reward_account.to_account_info(),
            amount,
            signer,
        )?;

        emit!(RewardsClaimed {
            series: self.base.series.key(),
            writer: self.base.writer.key(),
            amount,
        });
        msg!("Paid {} reward tokens to writer", amount);
        Ok(())
    }
}

/// Unmint that also pays the writer's share of harvested rewards for the
/// shares being retired.
pub fn unmint_handler(ctx: Context<WriterRewardContext>, amount: u64) -> Result<()> {
    ctx.accounts.validate()?;
    let reward_balance = ctx.accounts.harvest()?;

    let accounts = &ctx.accounts.base;
    let series_key = accounts.series.key();
    let mut series: OptionSeries = (**accounts.series).clone();
    let mut position: WriterPosition = (**accounts.position).clone();

    let owner_shares = settlement::shares_for(&position, amount)?;
    let reward = settlement::reward_share(&series, owner_shares, reward_balance)?;

    let underlying = accounts.underlying_custody();
    let strike = accounts.strike_custody();
    unmint::process(
        &mut series,
        series_key,
        &accounts.guard,
        &mut position,
        &Legs { underlying: &underlying, strike: &strike },
        &accounts.participant(),
        &accounts.option_token(),
        &accounts.option_account.to_account_info(),
        accounts.option_account.amount,
        amount,
    )?;

    ctx.accounts.base.series.set_inner(series);
    ctx.accounts.base.position.set_inner(position);
    ctx.accounts.pay_reward(reward)
}

/// Withdraw that also pays the writer's share of harvested rewards.
pub fn withdraw_handler(ctx: Context<WriterRewardContext>) -> Result<()> {
    ctx.accounts.validate()?;
    let reward_balance = ctx.accounts.harvest()?;

    let accounts = &ctx.accounts.base;
    let series_key = accounts.series.key();
    let mut series: OptionSeries = (**accounts.series).clone();
    let mut position: WriterPosition = (**accounts.position).clone();

    let reward = if series.total_shares == 0 {
        0
    } else {
        settlement::reward_share(&series, position.shares, reward_balance)?
    };

    let underlying = accounts.underlying_custody();
    let strike = accounts.strike_custody();
    withdraw::process(
        &mut series,
        series_key,
        &accounts.guard,
        &mut position,
        &Legs { underlying: &underlying, strike: &strike },
        &accounts.participant(),
    )?;

    ctx.accounts.base.series.set_inner(series);
    ctx.accounts.base.position.set_inner(position);
    ctx.accounts.pay_reward(reward)
}
