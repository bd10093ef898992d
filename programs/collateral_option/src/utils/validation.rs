use anchor_lang::prelude::*;

use crate::constants::{MAX_DECIMALS, MIN_EXERCISE_WINDOW};
use crate::errors::ErrorCode;
use crate::instructions::SeriesParams;
use crate::state::ExerciseType;

/// Validates that both legs are real, distinct assets
pub fn validate_assets(underlying_mint: Pubkey, strike_mint: Pubkey) -> Result<()> {
    require_keys_neq!(underlying_mint, Pubkey::default(), ErrorCode::InvalidAsset);
    require_keys_neq!(strike_mint, Pubkey::default(), ErrorCode::InvalidAsset);
    require_keys_neq!(underlying_mint, strike_mint, ErrorCode::DuplicateAssets);
    Ok(())
}

pub fn validate_decimals(decimals: u8) -> Result<()> {
    require!(decimals <= MAX_DECIMALS, ErrorCode::UnsupportedDecimals);
    Ok(())
}

/// Validates that expiration is in the future
pub fn validate_expiration(expiration: i64, now: i64) -> Result<()> {
    require!(expiration > now, ErrorCode::ExpirationInPast);
    Ok(())
}

/// Validates that strike price is non-zero
pub fn validate_strike_price(strike_price: u64) -> Result<()> {
    require!(strike_price > 0, ErrorCode::InvalidStrikePrice);
    Ok(())
}

pub fn validate_exercise_window(exercise_window: i64) -> Result<()> {
    require!(
        exercise_window >= MIN_EXERCISE_WINDOW,
        ErrorCode::ExerciseWindowTooShort
    );
    Ok(())
}

/// Only European settlement is wired.
pub fn validate_exercise_type(exercise_type: ExerciseType) -> Result<()> {
    require!(
        exercise_type == ExerciseType::European,
        ErrorCode::UnsupportedExerciseType
    );
    Ok(())
}

pub fn validate_series_params(params: &SeriesParams, now: i64) -> Result<()> {
    validate_strike_price(params.strike_price)?;
    validate_expiration(params.expiration, now)?;
    validate_exercise_window(params.exercise_window)?;
    validate_exercise_type(params.exercise_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::OptionType;

    fn params() -> SeriesParams {
        SeriesParams {
            option_type: OptionType::Put,
            exercise_type: ExerciseType::European,
            strike_price: 7_000_000_000,
            expiration: 10_000,
            exercise_window: MIN_EXERCISE_WINDOW,
            yield_bearing: false,
        }
    }

    #[test]
    fn accepts_well_formed_params() {
        assert!(validate_series_params(&params(), 9_999).is_ok());
    }

    #[test]
    fn rejects_each_configuration_error() {
        assert!(validate_series_params(&params(), 10_000).is_err());
        assert!(validate_series_params(&SeriesParams { strike_price: 0, ..params() }, 0).is_err());
        assert!(validate_series_params(
            &SeriesParams { exercise_window: MIN_EXERCISE_WINDOW - 1, ..params() },
            0
        )
        .is_err());
        assert!(validate_series_params(
            &SeriesParams { exercise_type: ExerciseType::American, ..params() },
            0
        )
        .is_err());
    }

    #[test]
    fn rejects_missing_or_identical_assets() {
        let asset = Pubkey::new_unique();
        assert!(validate_assets(asset, Pubkey::new_unique()).is_ok());
        assert!(validate_assets(asset, asset).is_err());
        assert!(validate_assets(Pubkey::default(), asset).is_err());
    }

    #[test]
    fn rejects_oversized_decimals() {
        assert!(validate_decimals(MAX_DECIMALS).is_ok());
        assert!(validate_decimals(MAX_DECIMALS + 1).is_err());
    }
}
