use anchor_lang::prelude::*;

/// A writer's settlement claim on one series.
///
/// PDA Seeds: "position", series, writer
///
/// The claim stays with the writer even if the minted option tokens are
/// transferred away; it only shrinks through unmint or withdraw.
#[account]
#[derive(InitSpace, Default, Debug, PartialEq, Eq)]
pub struct WriterPosition {
    pub series: Pubkey,
    pub writer: Pubkey,
    /// Options minted by this writer and not yet unminted.
    pub locked_amount: u64,
    /// Share of the series reserves owned by this writer.
    pub shares: u64,
    pub bump: u8,
}

impl WriterPosition {
    pub fn is_initialized(&self) -> bool {
        self.series != Pubkey::default()
    }
}
