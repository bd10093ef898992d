use anchor_lang::prelude::*;

use crate::errors::ErrorCode;
use crate::utils::math::{calculate_strike_amount, Rounding};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum OptionType {
    /// Right to sell the underlying at the strike price. Strike asset is collateral.
    Put,
    /// Right to buy the underlying at the strike price. Underlying is collateral.
    Call,
}

impl OptionType {
    pub const fn seed(self) -> u8 {
        match self {
            Self::Put => 0,
            Self::Call => 1,
        }
    }
}

/// Recorded for integrators. Only European series can be created.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum ExerciseType {
    European,
    American,
}

/// How the series holds its assets.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, InitSpace)]
pub enum CollateralKind {
    /// Both legs are SPL tokens held in PDA vaults.
    Standard,
    /// The underlying leg is native lamports held by a program-owned vault.
    WrappedNative,
    /// Collateral is a yield-bearing token that may also stream rewards.
    YieldBearing,
}

impl CollateralKind {
    pub const fn seed(self) -> u8 {
        match self {
            Self::Standard => 0,
            Self::WrappedNative => 1,
            Self::YieldBearing => 2,
        }
    }
}

/// Lifecycle phase, derived from the clock on every call and never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// `now < expiration`: mint and unmint.
    Active,
    /// `expiration <= now < expiration + exercise_window`: exercise only.
    ExerciseWindow,
    /// `now >= expiration + exercise_window`: withdraw only.
    Withdrawable,
}

/// What an exercise of `amount` options moves, from the holder's side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExerciseTerms {
    /// Paid by the holder: underlying for puts, strike for calls.
    pub pay_in: u64,
    /// Paid to the holder: strike for puts, underlying for calls.
    pub pay_out: u64,
}

/// Core data struct stored on-chain representing an option series
///
/// PDA Seeds (used to derive the OptionSeries address):
/// - "series"
/// - underlying_mint
/// - strike_mint
/// - strike_price
/// - expiration
/// - option_type
/// - kind
///
/// The series PDA is the mint authority of the option token and the owner of
/// every vault. Reserves are never cached here; they are read from the vaults.
#[account]
#[derive(InitSpace)]
pub struct OptionSeries {
    // === IMMUTABLE PARAMETERS ===
    pub authority: Pubkey,
    pub underlying_mint: Pubkey,
    pub strike_mint: Pubkey,
    pub strike_price: u64,            // strike-asset units per whole underlying
    pub strike_price_decimals: u8,    // strike mint decimals
    pub decimals: u8,                 // option decimals == underlying decimals
    pub option_type: OptionType,
    pub exercise_type: ExerciseType,
    pub kind: CollateralKind,
    pub expiration: i64,
    pub exercise_window: i64,
    pub bump: u8,

    // === DERIVED ADDRESSES ===
    pub option_mint: Pubkey,
    pub underlying_vault: Pubkey,     // token vault, or NativeVault for WrappedNative
    pub strike_vault: Pubkey,

    // === REWARDS (YieldBearing only, default keys until configured) ===
    pub reward_mint: Pubkey,
    pub reward_vault: Pubkey,
    pub reward_distributor: Pubkey,

    // === CLAIM LEDGER ===
    pub total_shares: u64,            // sum of WriterPosition.shares
    pub total_locked: u64,            // sum of WriterPosition.locked_amount
}

impl OptionSeries {
    pub fn start_of_exercise_window(&self) -> i64 {
        self.expiration
    }

    pub fn end_of_exercise_window(&self) -> i64 {
        self.expiration.saturating_add(self.exercise_window)
    }

    pub fn phase(&self, now: i64) -> Phase {
        if now < self.start_of_exercise_window() {
            Phase::Active
        } else if now < self.end_of_exercise_window() {
            Phase::ExerciseWindow
        } else {
            Phase::Withdrawable
        }
    }

    /// Fails with the reason matching where the clock actually is.
    pub fn require_phase(&self, now: i64, expected: Phase) -> Result<()> {
        let actual = self.phase(now);
        if actual == expected {
            return Ok(());
        }

        let reason = match (expected, actual) {
            (Phase::Active, _) => ErrorCode::OptionExpired,
            (Phase::ExerciseWindow, Phase::Active) => ErrorCode::OptionNotExpired,
            (Phase::ExerciseWindow, _) => ErrorCode::ExerciseWindowClosed,
            (Phase::Withdrawable, _) => ErrorCode::WithdrawWindowNotOpen,
        };
        Err(error!(reason))
    }

    pub fn collateral_mint(&self) -> Pubkey {
        match self.option_type {
            OptionType::Put => self.strike_mint,
            OptionType::Call => self.underlying_mint,
        }
    }

    /// Collateral a writer must lock for `amount` options. Rounded up.
    pub fn collateral_for(&self, amount: u64) -> Result<u64> {
        match self.option_type {
            OptionType::Put => {
                calculate_strike_amount(amount, self.strike_price, self.decimals, Rounding::Up)
            }
            OptionType::Call => Ok(amount),
        }
    }

    /// Assets swapped on exercise, rounded in the series' favour on both legs.
    pub fn exercise_terms(&self, amount: u64) -> Result<ExerciseTerms> {
        let terms = match self.option_type {
            OptionType::Put => ExerciseTerms {
                pay_in: amount,
                pay_out: calculate_strike_amount(
                    amount,
                    self.strike_price,
                    self.decimals,
                    Rounding::Down,
                )?,
            },
            OptionType::Call => ExerciseTerms {
                pay_in: calculate_strike_amount(
                    amount,
                    self.strike_price,
                    self.decimals,
                    Rounding::Up,
                )?,
                pay_out: amount,
            },
        };
        Ok(terms)
    }

    pub fn rewards_configured(&self) -> bool {
        self.kind == CollateralKind::YieldBearing && self.reward_vault != Pubkey::default()
    }
}
