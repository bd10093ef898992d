use anchor_lang::prelude::*;

use crate::custody::release_both;
use crate::events::CollateralWithdrawn;
use crate::instructions::common::{Legs, Participant};
use crate::instructions::WriterContext;
use crate::settlement::{self, Payout};
use crate::state::{OptionSeries, SeriesGuard, WriterPosition};
use crate::utils::SeriesSeeds;

/// Pays the writer's whole claim after the exercise window: a pro-rata cut
/// of whatever mix of underlying and strike the series now holds.
pub fn handler(ctx: Context<WriterContext>) -> Result<()> {
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
    )?;

    ctx.accounts.series.set_inner(series);
    ctx.accounts.position.set_inner(position);
    Ok(())
}

pub(crate) fn process<'info>(
    series: &mut OptionSeries,
    series_key: Pubkey,
    guard: &SeriesGuard,
    position: &mut WriterPosition,
    legs: &Legs<'_, 'info>,
    writer: &Participant<'info>,
) -> Result<Payout> {
    guard.require_not_stopped()?;

    let now = Clock::get()?.unix_timestamp;
    let reserves = legs.reserves()?;
    let series_seeds = SeriesSeeds::new(series);
    let seeds = series_seeds.as_seeds();
    let signer: &[&[&[u8]]] = &[&seeds];

    let payout = settlement::withdraw(series, position, reserves, now)?;

    release_both(
        legs.underlying,
        legs.strike,
        &writer.underlying_account,
        &writer.strike_account,
        payout.underlying,
        payout.strike,
        signer,
    )?;

    emit!(CollateralWithdrawn {
        series: series_key,
        writer: writer.user.key(),
        underlying_amount: payout.underlying,
        strike_amount: payout.strike,
        shares: payout.shares,
    });
    msg!(
        "Withdrew underlying: {}, strike: {}. Shares outstanding: {}",
        payout.underlying,
        payout.strike,
        series.total_shares
    );

    Ok(payout)
}
