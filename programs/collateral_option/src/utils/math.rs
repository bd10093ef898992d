use anchor_lang::prelude::*;
use crate::errors::ErrorCode;

/// Rounding direction for fixed-point conversions.
///
/// The series rounds `Up` whenever it receives assets and `Down` whenever it
/// pays them out, so truncation can only ever leave dust in the vaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    Down,
    Up,
}

/// Computes `a × b / denominator` with a u128 intermediate.
pub fn mul_div(a: u64, b: u64, denominator: u64, rounding: Rounding) -> Result<u64> {
    require!(denominator > 0, ErrorCode::MathOverflow);

    let numerator = (a as u128)
        .checked_mul(b as u128)
        .ok_or(ErrorCode::MathOverflow)?;
    let denominator = denominator as u128;

    let mut quotient = numerator / denominator;
    if rounding == Rounding::Up && numerator % denominator != 0 {
        quotient += 1;
    }

    u64::try_from(quotient).map_err(|_| error!(ErrorCode::MathOverflow))
}

/// 10^decimals, checked.
pub fn pow10(decimals: u8) -> Result<u64> {
    10_u64
        .checked_pow(decimals as u32)
        .ok_or_else(|| error!(ErrorCode::MathOverflow))
}

/// Calculates pro-rata share using the formula:
/// payout = (vault_balance × user_amount) / total_supply
///
/// Always rounds down. Returns 0 if vault_balance is 0 (nothing to distribute).
pub fn calculate_pro_rata_share(
    vault_balance: u64,
    user_amount: u64,
    total_supply: u64,
) -> Result<u64> {
    require!(total_supply > 0, ErrorCode::NothingToWithdraw);

    if vault_balance == 0 {
        return Ok(0);
    }

    mul_div(vault_balance, user_amount, total_supply, Rounding::Down)
}

/// Converts an amount of option tokens into strike-asset units.
/// Formula: (amount × strike_price) / 10^underlying_decimals
///
/// Option tokens carry the underlying's decimals and the strike price is
/// quoted in strike-asset units per whole underlying.
/// Example: 1 WBTC (1e8 raw) × 7000 USDC (7000e6 raw) = 7000e6 raw USDC
pub fn calculate_strike_amount(
    amount: u64,
    strike_price: u64,
    underlying_decimals: u8,
    rounding: Rounding,
) -> Result<u64> {
    mul_div(amount, strike_price, pow10(underlying_decimals)?, rounding)
}
