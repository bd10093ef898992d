use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::errors::ErrorCode;
use crate::state::{CollateralKind, OptionSeries};

/// Hooks a YieldBearing series up to an external reward distributor and
/// creates the vault harvested rewards are collected in.
#[derive(Accounts)]
pub struct ConfigureRewards<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        has_one = authority @ ErrorCode::Unauthorized,
        constraint = series.kind == CollateralKind::YieldBearing @ ErrorCode::InvalidSeriesKind,
    )]
    pub series: Box<Account<'info, OptionSeries>>,

    pub reward_mint: Box<Account<'info, Mint>>,

    #[account(
        init,
        payer = authority,
        seeds = [REWARD_VAULT_SEED, series.key().as_ref()],
        bump,
        token::mint = reward_mint,
        token::authority = series,
    )]
    pub reward_vault: Box<Account<'info, TokenAccount>>,

    /// CHECK: any executable program; it is only ever invoked through the
    /// claim_rewards interface
    #[account(executable)]
    pub distributor_program: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn handler(ctx: Context<ConfigureRewards>) -> Result<()> {
    let reward_mint = ctx.accounts.reward_mint.key();
    let reward_vault = ctx.accounts.reward_vault.key();
    let distributor = ctx.accounts.distributor_program.key();

    let series = &mut ctx.accounts.series;
    series.reward_mint = reward_mint;
    series.reward_vault = reward_vault;
    series.reward_distributor = distributor;

    msg!(
        "Rewards for series {}: mint {}, distributor {}",
        series.key(),
        reward_mint,
        distributor
    );

    Ok(())
}
