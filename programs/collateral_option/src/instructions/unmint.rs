use anchor_lang::prelude::*;

use crate::custody::release_both;
use crate::events::OptionsUnminted;
use crate::instructions::common::{Legs, OptionToken, Participant};
use crate::instructions::WriterContext;
use crate::settlement::{self, Payout};
use crate::state::{OptionSeries, SeriesGuard, WriterPosition};
use crate::utils::SeriesSeeds;

/// Burns `amount` of the writer's own options before expiry and returns the
/// matching share of the series reserves.
pub fn handler(ctx: Context<WriterContext>, amount: u64) -> Result<()> {
    let accounts = &ctx.accounts;
    let series_key = accounts.series.key();
    let mut series: OptionSeries = (**accounts.series).clone();
    let mut position: WriterPosition = (**accounts.position).clone();

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
        accounts.option_account.amount,
        amount,
    )?;

    ctx.accounts.series.set_inner(series);
    ctx.accounts.position.set_inner(position);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn process<'info>(
    series: &mut OptionSeries,
    series_key: Pubkey,
    guard: &SeriesGuard,
    position: &mut WriterPosition,
    legs: &Legs<'_, 'info>,
    writer: &Participant<'info>,
    options: &OptionToken<'info>,
    option_account: &AccountInfo<'info>,
    option_balance: u64,
    amount: u64,
) -> Result<Payout> {
    guard.require_not_stopped()?;

    let now = Clock::get()?.unix_timestamp;
    let reserves = legs.reserves()?;
    let series_seeds = SeriesSeeds::new(series);
    let seeds = series_seeds.as_seeds();
    let signer: &[&[&[u8]]] = &[&seeds];

    let payout = settlement::unmint(series, position, reserves, option_balance, amount, now)?;

    // 1. Burn the writer's options
    options.burn(option_account, &writer.user, amount)?;

    // 2. Release the writer's slice of both reserves
    release_both(
        legs.underlying,
        legs.strike,
        &writer.underlying_account,
        &writer.strike_account,
        payout.underlying,
        payout.strike,
        signer,
    )?;

    emit!(OptionsUnminted {
        series: series_key,
        writer: writer.user.key(),
        amount,
        underlying_amount: payout.underlying,
        strike_amount: payout.strike,
        shares: payout.shares,
    });
    msg!(
        "Unminted {} options. Underlying: {}, strike: {}, writer still locked: {}",
        amount,
        payout.underlying,
        payout.strike,
        position.locked_amount
    );

    Ok(payout)
}
