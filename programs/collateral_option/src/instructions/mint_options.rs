use anchor_lang::prelude::*;

use crate::errors::ErrorCode;
use crate::events::OptionsMinted;
use crate::instructions::common::{open_position, Legs, OptionToken, Participant};
use crate::instructions::WriterContext;
use crate::settlement;
use crate::state::{OptionSeries, SeriesGuard, WriterPosition};
use crate::utils::SeriesSeeds;

/// Writes `amount` options: the signer locks collateral and the options are
/// minted to `option_account`, which may belong to anyone.
pub fn handler(ctx: Context<WriterContext>, amount: u64) -> Result<()> {
    let accounts = &ctx.accounts;
    let series_key = accounts.series.key();
    let mut series: OptionSeries = (**accounts.series).clone();
    let mut position: WriterPosition = (**accounts.position).clone();
    open_position(&mut position, series_key, accounts.writer.key(), ctx.bumps.position);

    let underlying = accounts.underlying_custody();
    let strike = accounts.strike_custody();
    process(
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

/// Shared by the token and native mint instructions. Operates on copies of
/// the series and position; the caller commits them.
#[allow(clippy::too_many_arguments)]
pub(crate) fn process<'info>(
    series: &mut OptionSeries,
    series_key: Pubkey,
    guard: &SeriesGuard,
    position: &mut WriterPosition,
    legs: &Legs<'_, 'info>,
    writer: &Participant<'info>,
    options: &OptionToken<'info>,
    beneficiary: &AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    guard.require_not_stopped()?;
    let proposed_supply = options
        .supply
        .checked_add(amount)
        .ok_or(ErrorCode::MathOverflow)?;
    guard.check_capacity(proposed_supply)?;

    let now = Clock::get()?.unix_timestamp;
    let reserves = legs.reserves()?;
    let series_seeds = SeriesSeeds::new(series);
    let seeds = series_seeds.as_seeds();
    let signer: &[&[&[u8]]] = &[&seeds];

    let receipt = settlement::mint(series, position, reserves, amount, now)?;
    let option_type = series.option_type;

    // 1. Lock collateral from the writer
    msg!("Locking {} collateral for {} options", receipt.collateral, amount);
    legs.collateral(option_type).deposit(
        writer.collateral_account(option_type),
        &writer.user,
        receipt.collateral,
    )?;

    // 2. Mint options to the beneficiary (series PDA signs)
    msg!("Minting {} options to {}", amount, beneficiary.key());
    options.mint_to(beneficiary, amount, signer)?;

    emit!(OptionsMinted {
        series: series_key,
        writer: writer.user.key(),
        beneficiary: beneficiary.key(),
        amount,
        collateral: receipt.collateral,
        shares: receipt.shares,
    });
    msg!(
        "Minted {} options on series {}. Writer locked: {}, total locked: {}",
        amount,
        series_key,
        position.locked_amount,
        series.total_locked
    );

    Ok(())
}
