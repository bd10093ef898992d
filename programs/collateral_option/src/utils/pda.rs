use anchor_lang::prelude::*;

use crate::constants::SERIES_SEED;
use crate::state::OptionSeries;

/// Owned copies of the OptionSeries seed components.
///
/// Built before the series account is borrowed mutably, so the program can
/// keep signing vault transfers and option mints with the series PDA.
pub struct SeriesSeeds {
    underlying_mint: Pubkey,
    strike_mint: Pubkey,
    strike_price: [u8; 8],
    expiration: [u8; 8],
    option_type: [u8; 1],
    kind: [u8; 1],
    bump: [u8; 1],
}

impl SeriesSeeds {
    pub fn new(series: &OptionSeries) -> Self {
        Self {
            underlying_mint: series.underlying_mint,
            strike_mint: series.strike_mint,
            strike_price: series.strike_price.to_le_bytes(),
            expiration: series.expiration.to_le_bytes(),
            option_type: [series.option_type.seed()],
            kind: [series.kind.seed()],
            bump: [series.bump],
        }
    }

    pub fn as_seeds(&self) -> [&[u8]; 8] {
        [
            SERIES_SEED,
            self.underlying_mint.as_ref(),
            self.strike_mint.as_ref(),
            &self.strike_price,
            &self.expiration,
            &self.option_type,
            &self.kind,
            &self.bump,
        ]
    }
}
