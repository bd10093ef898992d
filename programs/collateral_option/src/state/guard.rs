use anchor_lang::prelude::*;

use crate::errors::ErrorCode;

/// Pause flag and capacity limit consulted by every settlement instruction.
///
/// PDA Seeds: "guard", series
#[account]
#[derive(InitSpace)]
pub struct SeriesGuard {
    pub series: Pubkey,
    pub authority: Pubkey,
    pub stopped: bool,
    /// Maximum option supply. Zero means unlimited.
    pub capacity: u64,
    pub bump: u8,
}

impl SeriesGuard {
    pub fn require_not_stopped(&self) -> Result<()> {
        require!(!self.stopped, ErrorCode::SeriesStopped);
        Ok(())
    }

    pub fn check_capacity(&self, proposed_supply: u64) -> Result<()> {
        require!(
            self.capacity == 0 || proposed_supply <= self.capacity,
            ErrorCode::CapacityExceeded
        );
        Ok(())
    }
}
