use anchor_lang::prelude::*;

use crate::state::{CollateralKind, OptionType};

#[event]
pub struct SeriesCreated {
    pub series: Pubkey,
    pub underlying_mint: Pubkey,
    pub strike_mint: Pubkey,
    pub strike_price: u64,
    pub option_type: OptionType,
    pub kind: CollateralKind,
    pub expiration: i64,
    pub exercise_window: i64,
}

#[event]
pub struct OptionsMinted {
    pub series: Pubkey,
    pub writer: Pubkey,
    pub beneficiary: Pubkey,
    pub amount: u64,
    pub collateral: u64,
    pub shares: u64,
}

#[event]
pub struct OptionsUnminted {
    pub series: Pubkey,
    pub writer: Pubkey,
    pub amount: u64,
    pub underlying_amount: u64,
    pub strike_amount: u64,
    pub shares: u64,
}

#[event]
pub struct OptionsExercised {
    pub series: Pubkey,
    pub holder: Pubkey,
    pub amount: u64,
    pub paid: u64,
    pub received: u64,
}

#[event]
pub struct CollateralWithdrawn {
    pub series: Pubkey,
    pub writer: Pubkey,
    pub underlying_amount: u64,
    pub strike_amount: u64,
    pub shares: u64,
}

#[event]
pub struct RewardsClaimed {
    pub series: Pubkey,
    pub writer: Pubkey,
    pub amount: u64,
}

#[event]
pub struct GuardUpdated {
    pub series: Pubkey,
    pub stopped: bool,
    pub capacity: u64,
}
