use anchor_lang::prelude::*;

use crate::constants::GUARD_SEED;
use crate::errors::ErrorCode;
use crate::events::GuardUpdated;
use crate::state::{OptionSeries, SeriesGuard};

#[derive(Accounts)]
pub struct UpdateGuard<'info> {
    pub authority: Signer<'info>,

    pub series: Box<Account<'info, OptionSeries>>,

    #[account(
        mut,
        seeds = [GUARD_SEED, series.key().as_ref()],
        bump = guard.bump,
        has_one = authority @ ErrorCode::Unauthorized,
        has_one = series,
    )]
    pub guard: Account<'info, SeriesGuard>,
}

/// Pauses or resumes the series and sets its supply cap (0 = unlimited).
pub fn handler(ctx: Context<UpdateGuard>, stopped: bool, capacity: u64) -> Result<()> {
    let guard = &mut ctx.accounts.guard;
    guard.stopped = stopped;
    guard.capacity = capacity;

    emit!(GuardUpdated {
        series: guard.series,
        stopped,
        capacity,
    });
    msg!(
        "Guard for series {}: stopped={}, capacity={}",
        guard.series,
        stopped,
        capacity
    );

    Ok(())
}
