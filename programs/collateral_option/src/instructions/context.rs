use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::custody::TokenCustody;
use crate::errors::ErrorCode;
use crate::instructions::common::{OptionToken, Participant};
use crate::state::{CollateralKind, OptionSeries, SeriesGuard, WriterPosition};

/// Accounts for writer-side operations (mint, unmint, withdraw) on a series
/// whose assets are both SPL tokens.
#[derive(Accounts)]
pub struct WriterContext<'info> {
    #[account(mut)]
    pub writer: Signer<'info>,

    #[account(
        mut,
        has_one = underlying_mint @ ErrorCode::InvalidUnderlyingMint,
        has_one = strike_mint @ ErrorCode::InvalidStrikeMint,
        has_one = option_mint @ ErrorCode::InvalidOptionMint,
        has_one = underlying_vault @ ErrorCode::InvalidVault,
        has_one = strike_vault @ ErrorCode::InvalidVault,
        constraint = series.kind != CollateralKind::WrappedNative @ ErrorCode::InvalidSeriesKind,
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

    pub underlying_mint: Box<Account<'info, Mint>>,
    pub strike_mint: Box<Account<'info, Mint>>,

    #[account(mut)]
    pub option_mint: Box<Account<'info, Mint>>,

    #[account(mut)]
    pub underlying_vault: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub strike_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = writer_underlying_account.mint == underlying_mint.key() @ ErrorCode::InvalidTokenAccount,
    )]
    pub writer_underlying_account: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = writer_strike_account.mint == strike_mint.key() @ ErrorCode::InvalidTokenAccount,
    )]
    pub writer_strike_account: Box<Account<'info, TokenAccount>>,

    /// Receives minted options (any beneficiary), or the writer's own
    /// account the options are burned from on unmint.
    #[account(
        mut,
        constraint = option_account.mint == option_mint.key() @ ErrorCode::InvalidTokenAccount,
    )]
    pub option_account: Box<Account<'info, TokenAccount>>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

impl<'info> WriterContext<'info> {
    pub fn participant(&self) -> Participant<'info> {
        Participant {
            user: self.writer.to_account_info(),
            underlying_account: self.writer_underlying_account.to_account_info(),
            strike_account: self.writer_strike_account.to_account_info(),
        }
    }

    pub fn option_token(&self) -> OptionToken<'info> {
        OptionToken {
            mint: self.option_mint.to_account_info(),
            supply: self.option_mint.supply,
            authority: self.series.to_account_info(),
            token_program: self.token_program.to_account_info(),
        }
    }

    pub fn underlying_custody(&self) -> TokenCustody<'_, 'info> {
        TokenCustody {
            vault: &self.underlying_vault,
            mint: &self.underlying_mint,
            series: self.series.to_account_info(),
            token_program: self.token_program.to_account_info(),
        }
    }

    pub fn strike_custody(&self) -> TokenCustody<'_, 'info> {
        TokenCustody {
            vault: &self.strike_vault,
            mint: &self.strike_mint,
            series: self.series.to_account_info(),
            token_program: self.token_program.to_account_info(),
        }
    }
}

/// Accounts for a holder exercising options on a token series.
#[derive(Accounts)]
pub struct HolderContext<'info> {
    pub holder: Signer<'info>,

    #[account(
        has_one = underlying_mint @ ErrorCode::InvalidUnderlyingMint,
        has_one = strike_mint @ ErrorCode::InvalidStrikeMint,
        has_one = option_mint @ ErrorCode::InvalidOptionMint,
        has_one = underlying_vault @ ErrorCode::InvalidVault,
        has_one = strike_vault @ ErrorCode::InvalidVault,
        constraint = series.kind != CollateralKind::WrappedNative @ ErrorCode::InvalidSeriesKind,
    )]
    pub series: Box<Account<'info, OptionSeries>>,

    #[account(
        seeds = [GUARD_SEED, series.key().as_ref()],
        bump = guard.bump,
    )]
    pub guard: Box<Account<'info, SeriesGuard>>,

    pub underlying_mint: Box<Account<'info, Mint>>,
    pub strike_mint: Box<Account<'info, Mint>>,

    #[account(mut)]
    pub option_mint: Box<Account<'info, Mint>>,

    #[account(mut)]
    pub underlying_vault: Box<Account<'info, TokenAccount>>,

    #[account(mut)]
    pub strike_vault: Box<Account<'info, TokenAccount>>,

    #[account(
        mut,
        constraint = holder_underlying_account.mint == underlying_mint.key() @ ErrorCode::InvalidTokenAccount,
    )]
    pub holder_underlying_account: Box<Account<'info, TokenAccount>>,

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
}

impl<'info> HolderContext<'info> {
    pub fn participant(&self) -> Participant<'info> {
        Participant {
            user: self.holder.to_account_info(),
            underlying_account: self.holder_underlying_account.to_account_info(),
            strike_account: self.holder_strike_account.to_account_info(),
        }
    }

    pub fn option_token(&self) -> OptionToken<'info> {
        OptionToken {
            mint: self.option_mint.to_account_info(),
            supply: self.option_mint.supply,
            authority: self.series.to_account_info(),
            token_program: self.token_program.to_account_info(),
        }
    }

    pub fn underlying_custody(&self) -> TokenCustody<'_, 'info> {
        TokenCustody {
            vault: &self.underlying_vault,
            mint: &self.underlying_mint,
            series: self.series.to_account_info(),
            token_program: self.token_program.to_account_info(),
        }
    }

    pub fn strike_custody(&self) -> TokenCustody<'_, 'info> {
        TokenCustody {
            vault: &self.strike_vault,
            mint: &self.strike_mint,
            series: self.series.to_account_info(),
            token_program: self.token_program.to_account_info(),
        }
    }
}
