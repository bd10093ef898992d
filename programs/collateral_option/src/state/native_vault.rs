use anchor_lang::prelude::*;

/// Program-owned lamport vault holding the underlying of a WrappedNative series.
///
/// PDA Seeds: "native_vault", series
///
/// Reserves are the lamports above the rent-exempt minimum.
#[account]
#[derive(InitSpace)]
pub struct NativeVault {
    pub series: Pubkey,
    pub bump: u8,
}
