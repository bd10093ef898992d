use anchor_lang::prelude::*;
use anchor_spl::token::spl_token::native_mint;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::errors::ErrorCode;
use crate::instructions::create_series::{initialize_series, SeriesParams};
use crate::state::{CollateralKind, NativeVault, OptionSeries, SeriesGuard};

/// Creates a series whose underlying is native SOL. The wrapped-native mint
/// identifies the asset; the lamports themselves sit in a [`NativeVault`].
#[derive(Accounts)]
#[instruction(params: SeriesParams)]
pub struct CreateNativeSeries<'info> {
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
            &[CollateralKind::WrappedNative.seed()],
        ],
        bump
    )]
    pub series: Box<Account<'info, OptionSeries>>,

    #[account(address = native_mint::ID @ ErrorCode::InvalidUnderlyingMint)]
    pub underlying_mint: Box<Account<'info, Mint>>,

    pub strike_mint: Box<Account<'info, Mint>>,

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
        space = 8 + NativeVault::INIT_SPACE,
        seeds = [NATIVE_VAULT_SEED, series.key().as_ref()],
        bump
    )]
    pub native_vault: Box<Account<'info, NativeVault>>,

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

pub fn handler(ctx: Context<CreateNativeSeries>, params: SeriesParams) -> Result<()> {
    let series_key = ctx.accounts.series.key();
    let accounts = ctx.accounts;

    initialize_series(
        &mut accounts.series,
        &mut accounts.guard,
        &params,
        CollateralKind::WrappedNative,
        accounts.authority.key(),
        &accounts.underlying_mint,
        &accounts.strike_mint,
        accounts.option_mint.key(),
        accounts.native_vault.key(),
        accounts.strike_vault.key(),
    )?;
    accounts.series.bump = ctx.bumps.series;
    accounts.guard.bump = ctx.bumps.guard;
    accounts.native_vault.series = series_key;
    accounts.native_vault.bump = ctx.bumps.native_vault;

    msg!(
        "Created native {:?} series {}: SOL @ {} {} expiring {}",
        params.option_type,
        series_key,
        params.strike_price,
        accounts.strike_mint.key(),
        params.expiration
    );
    msg!("Native vault: {}", accounts.native_vault.key());

    Ok(())
}
