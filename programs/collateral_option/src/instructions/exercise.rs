use anchor_lang::prelude::*;

use crate::events::OptionsExercised;
use crate::instructions::common::{Legs, OptionToken, Participant};
use crate::instructions::HolderContext;
use crate::settlement;
use crate::state::{OptionSeries, SeriesGuard};
use crate::utils::SeriesSeeds;

/// Exercises European options during the exercise window
/// Put: holder burns options + pays underlying → receives strike
/// Call: holder burns options + pays strike → receives underlying
pub fn handler(ctx: Context<HolderContext>, amount: u64) -> Result<()> {
    let accounts = &ctx.accounts;
    let underlying = accounts.underlying_custody();
    let strike = accounts.strike_custody();

    process(
        &accounts.series,
        accounts.series.key(),
        &accounts.guard,
        &Legs { underlying: &underlying, strike: &strike },
        &accounts.participant(),
        &accounts.option_token(),
        &accounts.holder_option_account.to_account_info(),
        accounts.holder_option_account.amount,
        amount,
    )
}

/// Exercise leaves every writer position untouched; the pool's asset mix
/// changes for all writers at once.
#[allow(clippy::too_many_arguments)]
pub(crate) fn process<'info>(
    series: &OptionSeries,
    series_key: Pubkey,
    guard: &SeriesGuard,
    legs: &Legs<'_, 'info>,
    holder: &Participant<'info>,
    options: &OptionToken<'info>,
    option_account: &AccountInfo<'info>,
    option_balance: u64,
    amount: u64,
) -> Result<()> {
    guard.require_not_stopped()?;

    let now = Clock::get()?.unix_timestamp;
    let reserves = legs.reserves()?;
    let terms = settlement::exercise(series, reserves, option_balance, amount, now)?;
    let option_type = series.option_type;

    let series_seeds = SeriesSeeds::new(series);
    let seeds = series_seeds.as_seeds();
    let signer: &[&[&[u8]]] = &[&seeds];

    // 1. Burn option tokens from holder (destroys the right to exercise)
    options.burn(option_account, &holder.user, amount)?;

    // 2. Holder pays the other side of the trade into the pool
    legs.exercise_input(option_type).deposit(
        holder.exercise_input_account(option_type),
        &holder.user,
        terms.pay_in,
    )?;

    // 3. Pool pays out collateral (series PDA signs)
    legs.exercise_output(option_type).release(
        holder.collateral_account(option_type),
        terms.pay_out,
        signer,
    )?;

    emit!(OptionsExercised {
        series: series_key,
        holder: holder.user.key(),
        amount,
        paid: terms.pay_in,
        received: terms.pay_out,
    });
    msg!(
        "Exercised {} {:?} options. Paid: {}, received: {}",
        amount,
        option_type,
        terms.pay_in,
        terms.pay_out
    );

    Ok(())
}
