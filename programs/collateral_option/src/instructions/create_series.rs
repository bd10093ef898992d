use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::errors::ErrorCode;
use crate::events::SeriesCreated;
use crate::state::{CollateralKind, ExerciseType, OptionSeries, OptionType, SeriesGuard};
use crate::utils::validation::{validate_assets, validate_decimals, validate_series_params};

/// Parameters supplied by the deploying factory. Immutable once stored.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeriesParams {
    pub option_type: OptionType,
    pub exercise_type: ExerciseType,
    /// Strike-asset units per whole underlying.
    pub strike_price: u64,
    pub expiration: i64,
    pub exercise_window: i64,
    /// Collateral is a yield-bearing token (ignored for native series).
    pub yield_bearing: bool,
}

impl SeriesParams {
    pub fn kind(&self) -> CollateralKind {
        if self.yield_bearing {
            CollateralKind::YieldBearing
        } else {
            CollateralKind::Standard
        }
    }
}

/// Creates a token-collateralized series: option mint, both vaults and the guard.
#[derive(Accounts)]
#[instruction(params: SeriesParams)]
pub struct CreateSeries<'info> {
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        init,
        payer = authority,
        space = 8 + OptionSeries::INIT_SPACE,
        seeds = [
            SERIES_SEED,
            underlying_mint.key().as_ref(),
            strike_mint.key().as_ref(),
            params.strike_price.to_le_bytes().as_ref(),
            params.expiration.to_le_bytes().as_ref(),
            &[params.option_type.seed()],
            &[params.kind().seed()],
        ],
        bump
    )]
    pub series: Box<Account<'info, OptionSeries>>,

    pub underlying_mint: Box<Account<'info, Mint>>,

    pub strike_mint: Box<Account<'info, Mint>>,

    /// Option token: same decimals as the underlying, minted by the series PDA
    #[account(
        init,
        payer = authority,
        seeds = [OPTION_MINT_SEED, series.key().as_ref()],
        bump,
        mint::decimals = underlying_mint.decimals,
        mint::authority = series,
    )]
    pub option_mint: Box<Account<'info, Mint>>,

    #[account(
        init,
        payer = authority,
        seeds = [UNDERLYING_VAULT_SEED, series.key().as_ref()],
        bump,
        token::mint = underlying_mint,
        token::authority = series,
    )]
    pub underlying_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        init,
        payer = authority,
        seeds = [STRIKE_VAULT_SEED, series.key().as_ref()],
        bump,
        token::mint = strike_mint,
        token::authority = series,
    )]
    pub strike_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        init,
        payer = authority,
        space = 8 + SeriesGuard::INIT_SPACE,
        seeds = [GUARD_SEED, series.key().as_ref()],
        bump
    )]
    pub guard: Account<'info, SeriesGuard>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub rent: Sysvar<'info, Rent>,
}

pub fn handler(ctx: Context<CreateSeries>, params: SeriesParams) -> Result<()> {
    let series_key = ctx.accounts.series.key();
    let accounts = ctx.accounts;

    initialize_series(
        &mut accounts.series,
        &mut accounts.guard,
        &params,
        params.kind(),
        accounts.authority.key(),
        &accounts.underlying_mint,
        &accounts.strike_mint,
        accounts.option_mint.key(),
        accounts.underlying_vault.key(),
        accounts.strike_vault.key(),
    )?;
    accounts.series.bump = ctx.bumps.series;
    accounts.guard.bump = ctx.bumps.guard;

    msg!(
        "Created {:?} {:?} series {}: {} @ {} {} expiring {}",
        params.kind(),
        params.option_type,
        series_key,
        accounts.underlying_mint.key(),
        params.strike_price,
        accounts.strike_mint.key(),
        params.expiration
    );
    msg!("Option mint: {}", accounts.option_mint.key());

    Ok(())
}

/// Validates the factory parameters and writes the immutable series record.
/// Shared by the token and native creation instructions.
#[allow(clippy::too_many_arguments)]
pub(crate) fn initialize_series(
    series: &mut Account<OptionSeries>,
    guard: &mut Account<SeriesGuard>,
    params: &SeriesParams,
    kind: CollateralKind,
    authority: Pubkey,
    underlying_mint: &Account<Mint>,
    strike_mint: &Account<Mint>,
    option_mint: Pubkey,
    underlying_vault: Pubkey,
    strike_vault: Pubkey,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    validate_series_params(params, now)?;
    validate_assets(underlying_mint.key(), strike_mint.key())?;
    validate_decimals(underlying_mint.decimals)?;
    validate_decimals(strike_mint.decimals)?;
    require!(
        kind != CollateralKind::WrappedNative || !params.yield_bearing,
        ErrorCode::InvalidSeriesKind
    );

    series.authority = authority;
    series.underlying_mint = underlying_mint.key();
    series.strike_mint = strike_mint.key();
    series.strike_price = params.strike_price;
    series.strike_price_decimals = strike_mint.decimals;
    series.decimals = underlying_mint.decimals;
    series.option_type = params.option_type;
    series.exercise_type = params.exercise_type;
    series.kind = kind;
    series.expiration = params.expiration;
    series.exercise_window = params.exercise_window;

    series.option_mint = option_mint;
    series.underlying_vault = underlying_vault;
    series.strike_vault = strike_vault;

    series.reward_mint = Pubkey::default();
    series.reward_vault = Pubkey::default();
    series.reward_distributor = Pubkey::default();

    series.total_shares = 0;
    series.total_locked = 0;

    guard.series = series.key();
    guard.authority = authority;
    guard.stopped = false;
    guard.capacity = 0;

    emit!(SeriesCreated {
        series: series.key(),
        underlying_mint: series.underlying_mint,
        strike_mint: series.strike_mint,
        strike_price: series.strike_price,
        option_type: series.option_type,
        kind,
        expiration: series.expiration,
        exercise_window: series.exercise_window,
    });

    Ok(())
}
