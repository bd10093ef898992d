//! Settlement for WrappedNative series: the underlying leg moves as lamports
//! between the user's wallet and the series' [`NativeVault`].

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::custody::{NativeCustody, TokenCustody};
use crate::errors::ErrorCode;
use crate::instructions::common::{open_position, Legs, OptionToken, Participant};
use crate::instructions::{exercise, mint_options, unmint, withdraw};
use crate::state::{CollateralKind, NativeVault, OptionSeries, SeriesGuard, WriterPosition};

#[derive(Accounts)]
pub struct NativeWriterContext<'info> {
    #[account(mut)]
    pub writer: Signer<'info>,

    #[account(
        mut,
        has_one = strike_mint @ ErrorCode::InvalidStrikeMint,
        has_one = option_mint @ ErrorCode::InvalidOptionMint,
        has_one = strike_vault @ ErrorCode::InvalidVault,
        constraint = series.kind == CollateralKind::WrappedNative @ ErrorCode::InvalidSeriesKind,
        constraint = series.underlying_vault == native_vault.key() @ ErrorCode::InvalidVault,
    )]
    pub series: Box<Account<'info, OptionSeries>>,

    #[account(
        seeds = [GUARD_SEED, series.key().as_ref()],
        bump = guard.bump,
    )]
    pub guard: Box<Account<'info, SeriesGuard>>,

    #[account(
        init_if_needed,
        payer = writer,
        space = 8 + WriterPosition::INIT_SPACE,
        seeds = [POSITION_SEED, series.key().as_ref(), writer.key().as_ref()],
        bump
    )]
    pub position: Box<Account<'info, WriterPosition>>,

    pub strike_mint: Box<Account<'info, Mint>>,

    #[account(mut)]
    pub option_mint: Box<Account<'info, Mint>>,

    #[account(mut)]
    pub native_vault: Box<Account<'info, NativeVault>>,

    #[account(mut)]
    pub strike_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = writer_strike_account.mint == strike_mint.key() @ ErrorCode::InvalidTokenAccount,
    )]
    pub writer_strike_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = option_account.mint == option_mint.key() @ ErrorCode::InvalidTokenAccount,
    )]
    pub option_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> NativeWriterContext<'info> {
    /// Lamports come from, and go back to, the writer's wallet.
    fn participant(&self) -> Participant<'info> {
        Participant {
            user: self.writer.to_account_info(),
            underlying_account: self.writer.to_account_info(),
            strike_account: self.writer_strike_account.to_account_info(),
        }
    }

    fn option_token(&self) -> OptionToken<'info> {
        OptionToken {
            mint: self.option_mint.to_account_info(),
            supply: self.option_mint.supply,
            authority: self.series.to_account_info(),
            token_program: self.token_program.to_account_info(),
        }
    }

    fn underlying_custody(&self) -> NativeCustody<'_, 'info> {
        NativeCustody {
            vault: &self.native_vault,
            system_program: self.system_program.to_account_info(),
        }
    }

    fn strike_custody(&self) -> TokenCustody<'_, 'info> {
        TokenCustody {
            vault: &self.strike_vault,
            mint: &self.strike_mint,
            series: self.series.to_account_info(),
            token_program: self.token_program.to_account_info(),
        }
    }
}

#[derive(Accounts)]
pub struct NativeHolderContext<'info> {
    #[account(mut)]
    pub holder: Signer<'info>,

    #[account(
        has_one = strike_mint @ ErrorCode::InvalidStrikeMint,
        has_one = option_mint @ ErrorCode::InvalidOptionMint,
        has_one = strike_vault @ ErrorCode::InvalidVault,
        constraint = series.kind == CollateralKind::WrappedNative @ ErrorCode::InvalidSeriesKind,
        constraint = series.underlying_vault == native_vault.key() @ ErrorCode::InvalidVault,
    )]
    pub series: Box<Account<'info, OptionSeries>>,

    #[account(
        seeds = [GUARD_SEED, series.key().as_ref()],
        bump = guard.bump,
    )]
    pub guard: Box<Account<'info, SeriesGuard>>,

    pub strike_mint: Box<Account<'info, Mint>>,

    #[account(mut)]
    pub option_mint: Box<Account<'info, Mint>>,

    #[account(mut)]
    pub native_vault: Box<Account<'info, NativeVault>>,

    #[account(mut)]
    pub strike_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = holder_strike_account.mint == strike_mint.key() @ ErrorCode::InvalidTokenAccount,
    )]
    pub holder_strike_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = holder_option_account.mint == option_mint.key() @ ErrorCode::InvalidTokenAccount,
    )]
    pub holder_option_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> NativeHolderContext<'info> {
    fn participant(&self) -> Participant<'info> {
        Participant {
            user: self.holder.to_account_info(),
            underlying_account: self.holder.to_account_info(),
            strike_account: self.holder_strike_account.to_account_info(),
        }
    }
}

pub fn mint_handler(ctx: Context<NativeWriterContext>, amount: u64) -> Result<()> {
    let accounts = &ctx.accounts;
    let series_key = accounts.series.key();
    let mut series: OptionSeries = (**accounts.series).clone();
    let mut position: WriterPosition = (**accounts.position).clone();
    open_position(&mut position, series_key, accounts.writer.key(), ctx.bumps.position);

    let underlying = accounts.underlying_custody();
    let strike = accounts.strike_custody();
    mint_options::process(
        &mut series,
        series_key,
        &accounts.guard,
        &mut position,
        &Legs { underlying: &underlying, strike: &strike },
        &accounts.participant(),
        &accounts.option_token(),
        &accounts.option_account.to_account_info(),
        amount,
    )?;

    ctx.accounts.series.set_inner(series);
    ctx.accounts.position.set_inner(position);
    Ok(())
}

pub fn unmint_handler(ctx: Context<NativeWriterContext>, amount: u64) -> Result<()> {
    let accounts = &ctx.accounts;
    let series_key = accounts.series.key();
    let mut series: OptionSeries = (**accounts.series).clone();
    let mut position: WriterPosition = (**accounts.position).clone();

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

    ctx.accounts.series.set_inner(series);
    ctx.accounts.position.set_inner(position);
    Ok(())
}

pub fn exercise_handler(ctx: Context<NativeHolderContext>, amount: u64) -> Result<()> {
    let accounts = &ctx.accounts;
    let underlying = NativeCustody {
        vault: &accounts.native_vault,
        system_program: accounts.system_program.to_account_info(),
    };
    let strike = TokenCustody {
        vault: &accounts.strike_vault,
        mint: &accounts.strike_mint,
        series: accounts.series.to_account_info(),
        token_program: accounts.token_program.to_account_info(),
    };
    let options = OptionToken {
        mint: accounts.option_mint.to_account_info(),
        supply: accounts.option_mint.supply,
        authority: accounts.series.to_account_info(),
        token_program: accounts.token_program.to_account_info(),
    };

    exercise::process(
        &accounts.series,
        accounts.series.key(),
        &accounts.guard,
        &Legs { underlying: &underlying, strike: &strike },
        &accounts.participant(),
        &options,
        &accounts.holder_option_account.to_account_info(),
        accounts.holder_option_account.amount,
        amount,
    )
}

pub fn withdraw_handler(ctx: Context<NativeWriterContext>) -> Result<()> {
    let accounts = &ctx.accounts;
    let series_key = accounts.series.key();
    let mut series: OptionSeries = (**accounts.series).clone();
    let mut position: WriterPosition = (**accounts.position).clone();

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

    ctx.accounts.series.set_inner(series);
    ctx.accounts.position.set_inner(position);
    Ok(())
}
