//! Settlement engine shared by every collateral kind.
//!
//! Each operation validates against the clock and the live reserves, updates
//! the claim ledger on [`OptionSeries`] / [`WriterPosition`], and returns the
//! asset movements the caller must perform. Nothing here touches accounts
//! other than the two ledgers, so a failed precondition leaves no trace.
//!
//! Writers own shares of one pooled reserve. Payouts are always
//! `shares × live reserve / total_shares`, which keeps interest accrual and
//! exercise proceeds apportioned without any writer having to act first.

use anchor_lang::prelude::*;

use crate::errors::ErrorCode;
use crate::state::{ExerciseTerms, OptionSeries, OptionType, Phase, WriterPosition};
use crate::utils::math::{calculate_pro_rata_share, mul_div, Rounding};

/// Balances currently held by a series, read from custody at call time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reserves {
    pub underlying: u64,
    pub strike: u64,
}

impl Reserves {
    /// Balance of the asset writers lock at mint.
    pub fn collateral(&self, option_type: OptionType) -> u64 {
        match option_type {
            OptionType::Put => self.strike,
            OptionType::Call => self.underlying,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MintReceipt {
    /// Collateral to pull from the writer.
    pub collateral: u64,
    /// Shares credited to the writer.
    pub shares: u64,
}

/// Amounts released to a writer by unmint or withdraw.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Payout {
    pub underlying: u64,
    pub strike: u64,
    /// Shares retired to fund this payout.
    pub shares: u64,
}

impl Payout {
    pub fn collateral(&self, option_type: OptionType) -> u64 {
        match option_type {
            OptionType::Put => self.strike,
            OptionType::Call => self.underlying,
        }
    }
}

pub fn mint(
    series: &mut OptionSeries,
    position: &mut WriterPosition,
    reserves: Reserves,
    amount: u64,
    now: i64,
) -> Result<MintReceipt> {
    series.require_phase(now, Phase::Active)?;
    require!(amount > 0, ErrorCode::InvalidAmount);

    let collateral = series.collateral_for(amount)?;
    require!(collateral > 0, ErrorCode::AmountTooLow);

    // Price new shares against the current balance so earlier writers keep
    // whatever the pool has accrued so far.
    let reserve = reserves.collateral(series.option_type);
    let shares = if series.total_shares == 0 {
        collateral
    } else {
        require!(reserve > 0, ErrorCode::InsufficientCollateral);
        mul_div(collateral, series.total_shares, reserve, Rounding::Down)?
    };
    require!(shares > 0, ErrorCode::AmountTooLow);

    // Once a share is worth more than one unit, truncating `shares` can hand
    // part of the deposit to existing writers. Refuse anything losing more
    // than one unit at the post-mint price.
    if series.total_shares > 0 {
        let worth = mul_div(
            shares,
            reserve.checked_add(collateral).ok_or(ErrorCode::MathOverflow)?,
            series
                .total_shares
                .checked_add(shares)
                .ok_or(ErrorCode::MathOverflow)?,
            Rounding::Down,
        )?;
        require!(worth.saturating_add(1) >= collateral, ErrorCode::AmountTooLow);
    }

    position.locked_amount = position
        .locked_amount
        .checked_add(amount)
        .ok_or(ErrorCode::MathOverflow)?;
    position.shares = position
        .shares
        .checked_add(shares)
        .ok_or(ErrorCode::MathOverflow)?;
    series.total_locked = series
        .total_locked
        .checked_add(amount)
        .ok_or(ErrorCode::MathOverflow)?;
    series.total_shares = series
        .total_shares
        .checked_add(shares)
        .ok_or(ErrorCode::MathOverflow)?;

    Ok(MintReceipt { collateral, shares })
}

/// Shares backing `amount` of the writer's locked options.
pub fn shares_for(position: &WriterPosition, amount: u64) -> Result<u64> {
    require!(amount > 0, ErrorCode::InvalidAmount);
    require!(
        position.locked_amount >= amount,
        ErrorCode::ExceedsLockedAmount
    );

    if amount == position.locked_amount {
        return Ok(position.shares);
    }
    mul_div(position.shares, amount, position.locked_amount, Rounding::Down)
}

pub fn unmint(
    series: &mut OptionSeries,
    position: &mut WriterPosition,
    reserves: Reserves,
    option_balance: u64,
    amount: u64,
    now: i64,
) -> Result<Payout> {
    series.require_phase(now, Phase::Active)?;
    require!(amount > 0, ErrorCode::InvalidAmount);
    require!(option_balance >= amount, ErrorCode::InsufficientOptionBalance);

    let owner_shares = shares_for(position, amount)?;
    let payout = share_of_reserves(series, reserves, owner_shares)?;
    require!(
        payout.collateral(series.option_type) > 0,
        ErrorCode::AmountTooLow
    );

    position.locked_amount -= amount;
    position.shares -= owner_shares;
    series.total_locked = series
        .total_locked
        .checked_sub(amount)
        .ok_or(ErrorCode::MathOverflow)?;
    series.total_shares = series
        .total_shares
        .checked_sub(owner_shares)
        .ok_or(ErrorCode::MathOverflow)?;

    Ok(payout)
}

/// Exercise does not touch any writer's claim: the burned options leave
/// circulation and the pool's asset mix changes for every writer at once.
pub fn exercise(
    series: &OptionSeries,
    reserves: Reserves,
    option_balance: u64,
    amount: u64,
    now: i64,
) -> Result<ExerciseTerms> {
    series.require_phase(now, Phase::ExerciseWindow)?;
    require!(amount > 0, ErrorCode::InvalidAmount);
    require!(option_balance >= amount, ErrorCode::InsufficientOptionBalance);

    let terms = series.exercise_terms(amount)?;
    require!(terms.pay_in > 0 && terms.pay_out > 0, ErrorCode::AmountTooLow);

    let available = match series.option_type {
        OptionType::Put => reserves.strike,
        OptionType::Call => reserves.underlying,
    };
    require!(available >= terms.pay_out, ErrorCode::InsufficientCollateral);

    Ok(terms)
}

pub fn withdraw(
    series: &mut OptionSeries,
    position: &mut WriterPosition,
    reserves: Reserves,
    now: i64,
) -> Result<Payout> {
    series.require_phase(now, Phase::Withdrawable)?;
    require!(position.shares > 0, ErrorCode::NothingToWithdraw);

    let payout = share_of_reserves(series, reserves, position.shares)?;

    series.total_locked = series
        .total_locked
        .checked_sub(position.locked_amount)
        .ok_or(ErrorCode::MathOverflow)?;
    series.total_shares = series
        .total_shares
        .checked_sub(position.shares)
        .ok_or(ErrorCode::MathOverflow)?;
    position.locked_amount = 0;
    position.shares = 0;

    Ok(payout)
}

/// What `withdraw` would pay the writer right now, without touching state.
pub fn preview_withdraw(
    series: &OptionSeries,
    position: &WriterPosition,
    reserves: Reserves,
) -> Result<Payout> {
    if position.shares == 0 {
        return Ok(Payout::default());
    }
    share_of_reserves(series, reserves, position.shares)
}

/// Writer's cut of a reward balance, by the same share formula as collateral.
pub fn reward_share(series: &OptionSeries, owner_shares: u64, reward_balance: u64) -> Result<u64> {
    calculate_pro_rata_share(reward_balance, owner_shares, series.total_shares)
}

fn share_of_reserves(series: &OptionSeries, reserves: Reserves, shares: u64) -> Result<Payout> {
    Ok(Payout {
        underlying: calculate_pro_rata_share(reserves.underlying, shares, series.total_shares)?,
        strike: calculate_pro_rata_share(reserves.strike, shares, series.total_shares)?,
        shares,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use proptest::prelude::*;

    use super::*;
    use crate::state::fixtures;

    const ACTIVE: i64 = 0;
    const EXERCISE: i64 = 1_000;
    const CLOSED: i64 = 1_000 + 86_400;

    fn code(err: anchor_lang::error::Error) -> u32 {
        match err {
            anchor_lang::error::Error::AnchorError(e) => e.error_code_number,
            other => panic!("unexpected error {other:?}"),
        }
    }

    fn assert_fails<T: std::fmt::Debug>(result: Result<T>, expected: ErrorCode) {
        assert_eq!(code(result.unwrap_err()), u32::from(expected));
    }

    /// In-memory stand-in for the vaults, the option mint and token accounts.
    #[derive(Clone)]
    struct Pool {
        series: OptionSeries,
        reserves: Reserves,
        positions: BTreeMap<u8, WriterPosition>,
        balances: BTreeMap<u8, u64>,
        supply: u64,
    }

    impl Pool {
        fn new(option_type: OptionType, strike_price: u64) -> Self {
            Self {
                series: fixtures::series(option_type, strike_price),
                reserves: Reserves::default(),
                positions: BTreeMap::new(),
                balances: BTreeMap::new(),
                supply: 0,
            }
        }

        fn balance(&self, who: u8) -> u64 {
            self.balances.get(&who).copied().unwrap_or(0)
        }

        fn position(&self, who: u8) -> WriterPosition {
            self.positions.get(&who).cloned().unwrap_or_default()
        }

        fn mint(&mut self, writer: u8, amount: u64) -> Result<MintReceipt> {
            self.mint_to(writer, writer, amount)
        }

        fn mint_to(&mut self, writer: u8, beneficiary: u8, amount: u64) -> Result<MintReceipt> {
            let mut position = self.position(writer);
            let receipt = mint(&mut self.series, &mut position, self.reserves, amount, ACTIVE)?;
            self.positions.insert(writer, position);
            match self.series.option_type {
                OptionType::Put => self.reserves.strike += receipt.collateral,
                OptionType::Call => self.reserves.underlying += receipt.collateral,
            }
            *self.balances.entry(beneficiary).or_default() += amount;
            self.supply += amount;
            Ok(receipt)
        }

        fn unmint(&mut self, writer: u8, amount: u64) -> Result<Payout> {
            let mut position = self.position(writer);
            let balance = self.balance(writer);
            let payout = unmint(
                &mut self.series,
                &mut position,
                self.reserves,
                balance,
                amount,
                ACTIVE,
            )?;
            self.positions.insert(writer, position);
            self.reserves.underlying -= payout.underlying;
            self.reserves.strike -= payout.strike;
            self.balances.insert(writer, balance - amount);
            self.supply -= amount;
            Ok(payout)
        }

        fn transfer(&mut self, from: u8, to: u8, amount: u64) {
            let balance = self.balance(from);
            assert!(balance >= amount);
            self.balances.insert(from, balance - amount);
            *self.balances.entry(to).or_default() += amount;
        }

        fn exercise(&mut self, holder: u8, amount: u64) -> Result<ExerciseTerms> {
            let balance = self.balance(holder);
            let terms = exercise(&self.series, self.reserves, balance, amount, EXERCISE)?;
            match self.series.option_type {
                OptionType::Put => {
                    self.reserves.underlying += terms.pay_in;
                    self.reserves.strike -= terms.pay_out;
                }
                OptionType::Call => {
                    self.reserves.strike += terms.pay_in;
                    self.reserves.underlying -= terms.pay_out;
                }
            }
            self.balances.insert(holder, balance - amount);
            self.supply -= amount;
            Ok(terms)
        }

        fn withdraw(&mut self, writer: u8) -> Result<Payout> {
            let mut position = self.position(writer);
            let payout = withdraw(&mut self.series, &mut position, self.reserves, CLOSED)?;
            self.positions.insert(writer, position);
            self.reserves.underlying -= payout.underlying;
            self.reserves.strike -= payout.strike;
            Ok(payout)
        }

        /// Exogenous growth of the collateral vault, in basis points.
        fn accrue(&mut self, bps: u64) {
            match self.series.option_type {
                OptionType::Put => self.reserves.strike += self.reserves.strike * bps / 10_000,
                OptionType::Call => {
                    self.reserves.underlying += self.reserves.underlying * bps / 10_000;
                }
            }
        }

        /// Collateral sent straight to the vault, bypassing mint.
        fn donate(&mut self, amount: u64) {
            match self.series.option_type {
                OptionType::Put => self.reserves.strike += amount,
                OptionType::Call => self.reserves.underlying += amount,
            }
        }

        fn assert_ledger_consistent(&self) {
            let shares: u64 = self.positions.values().map(|p| p.shares).sum();
            let locked: u64 = self.positions.values().map(|p| p.locked_amount).sum();
            assert_eq!(shares, self.series.total_shares);
            assert_eq!(locked, self.series.total_locked);
        }
    }

    const WRITER: u8 = 1;
    const OTHER_WRITER: u8 = 2;
    const HOLDER: u8 = 9;
    const ROUND_TRIP: u8 = 7;

    #[test]
    fn put_fully_exercised_pays_writer_in_underlying() {
        let mut pool = Pool::new(OptionType::Put, 7_000_000_000);
        pool.series.decimals = 6;

        let receipt = pool.mint(WRITER, 100_000_000).unwrap();
        assert_eq!(receipt.collateral, 7_000 * 100_000_000);
        assert_eq!(pool.reserves.strike, 7_000 * 100_000_000);

        pool.transfer(WRITER, HOLDER, 100_000_000);
        let terms = pool.exercise(HOLDER, 100_000_000).unwrap();
        assert_eq!(terms.pay_in, 100_000_000);
        assert_eq!(terms.pay_out, 7_000 * 100_000_000);
        assert_eq!(pool.supply, 0);

        let payout = pool.withdraw(WRITER).unwrap();
        assert_eq!(payout.underlying, 100_000_000);
        assert_eq!(payout.strike, 0);
        assert_eq!(pool.reserves, Reserves::default());
        pool.assert_ledger_consistent();
    }

    #[test]
    fn interest_accrued_between_mints_is_shared_fairly() {
        let mut pool = Pool::new(OptionType::Put, 7_000_000_000);
        pool.series.decimals = 6;
        let deposit = 7_000 * 100_000_000;

        pool.mint(WRITER, 100_000_000).unwrap();
        pool.accrue(100);
        let second = pool.mint(OTHER_WRITER, 100_000_000).unwrap();
        assert!(second.shares < deposit);
        pool.accrue(100);

        let first = pool.unmint(WRITER, 100_000_000).unwrap();
        let last = pool.unmint(OTHER_WRITER, 100_000_000).unwrap();

        // first writer compounded twice, second once
        assert!(first.strike >= deposit + deposit * 201 / 10_000 - 1);
        assert!(last.strike >= deposit + deposit / 100 - 1);
        assert_eq!(pool.reserves.strike, 0);
        assert_eq!(pool.series.total_shares, 0);
        pool.assert_ledger_consistent();
    }

    #[test]
    fn mint_then_unmint_restores_everything() {
        let mut pool = Pool::new(OptionType::Put, 1_234_567);
        pool.mint(OTHER_WRITER, 987_654_321).unwrap();
        let before = (pool.series.total_locked, pool.supply, pool.reserves.strike);

        let receipt = pool.mint(WRITER, 55_555_555).unwrap();
        let payout = pool.unmint(WRITER, 55_555_555).unwrap();

        assert!(payout.strike <= receipt.collateral);
        assert!(receipt.collateral - payout.strike <= 1);
        assert_eq!(pool.position(WRITER).locked_amount, 0);
        assert_eq!(pool.position(WRITER).shares, 0);
        assert_eq!(
            (pool.series.total_locked, pool.supply),
            (before.0, before.1)
        );
        assert!(pool.reserves.strike >= before.2);
    }

    #[test]
    fn partial_unmint_releases_proportional_collateral() {
        let mut pool = Pool::new(OptionType::Call, 7_000_000_000);
        pool.mint(WRITER, 400).unwrap();

        let payout = pool.unmint(WRITER, 100).unwrap();
        assert_eq!(payout.underlying, 100);
        assert_eq!(payout.shares, 100);
        assert_eq!(pool.position(WRITER).locked_amount, 300);
        assert_eq!(pool.position(WRITER).shares, 300);
        assert_eq!(pool.reserves.underlying, 300);
    }

    #[test]
    fn unmint_requires_tokens_and_claim() {
        let mut pool = Pool::new(OptionType::Put, 7_000_000_000);
        pool.mint(WRITER, 1_000).unwrap();

        assert_fails(pool.unmint(WRITER, 1_001), ErrorCode::InsufficientOptionBalance);
        assert_fails(pool.unmint(WRITER, 0), ErrorCode::InvalidAmount);

        // tokens bought by someone who never wrote carry no claim
        pool.transfer(WRITER, HOLDER, 500);
        assert_fails(pool.unmint(HOLDER, 500), ErrorCode::ExceedsLockedAmount);
        assert_fails(pool.unmint(WRITER, 600), ErrorCode::InsufficientOptionBalance);
        assert!(pool.unmint(WRITER, 500).is_ok());
    }

    #[test]
    fn claim_follows_the_writer_not_the_beneficiary() {
        let mut pool = Pool::new(OptionType::Put, 7_000_000_000);
        pool.mint_to(WRITER, HOLDER, 1_000).unwrap();

        assert_eq!(pool.balance(WRITER), 0);
        assert_eq!(pool.position(WRITER).locked_amount, 1_000);
        assert_fails(pool.unmint(WRITER, 1_000), ErrorCode::InsufficientOptionBalance);
        assert_fails(pool.withdraw(HOLDER), ErrorCode::NothingToWithdraw);

        let payout = pool.withdraw(WRITER).unwrap();
        assert_eq!(payout.strike, 70_000);
    }

    #[test]
    fn operations_are_gated_by_phase() {
        let mut pool = Pool::new(OptionType::Put, 7_000_000_000);
        pool.mint(WRITER, 1_000).unwrap();
        let mut position = pool.position(WRITER);

        assert_fails(
            mint(&mut pool.series, &mut position, pool.reserves, 1, EXERCISE),
            ErrorCode::OptionExpired,
        );
        assert_fails(
            unmint(&mut pool.series, &mut position, pool.reserves, 1_000, 1, EXERCISE),
            ErrorCode::OptionExpired,
        );
        assert_fails(
            exercise(&pool.series, pool.reserves, 1_000, 1, ACTIVE),
            ErrorCode::OptionNotExpired,
        );
        assert_fails(
            exercise(&pool.series, pool.reserves, 1_000, 1, CLOSED),
            ErrorCode::ExerciseWindowClosed,
        );
        assert_fails(
            withdraw(&mut pool.series, &mut position, pool.reserves, EXERCISE),
            ErrorCode::WithdrawWindowNotOpen,
        );
        // nothing above touched the ledger
        assert_eq!(position, pool.position(WRITER));
        pool.assert_ledger_consistent();
    }

    #[test]
    fn second_withdraw_has_nothing_left() {
        let mut pool = Pool::new(OptionType::Call, 7_000_000_000);
        pool.mint(WRITER, 1_000).unwrap();
        pool.withdraw(WRITER).unwrap();
        assert_fails(pool.withdraw(WRITER), ErrorCode::NothingToWithdraw);
    }

    #[test]
    fn withdraw_order_does_not_change_totals() {
        let run = |first: u8, second: u8| {
            let mut pool = Pool::new(OptionType::Put, 7_000_000_000);
            pool.mint(WRITER, 300_000_000).unwrap();
            pool.mint(OTHER_WRITER, 100_000_000).unwrap();
            pool.transfer(WRITER, HOLDER, 200_000_000);
            pool.exercise(HOLDER, 200_000_000).unwrap();

            let a = pool.withdraw(first).unwrap();
            let b = pool.withdraw(second).unwrap();
            assert_eq!(pool.reserves, Reserves::default());
            if first == WRITER { (a, b) } else { (b, a) }
        };

        let (w1, w2) = run(WRITER, OTHER_WRITER);
        let (w1_late, w2_early) = run(OTHER_WRITER, WRITER);
        assert_eq!((w1.underlying, w1.strike), (w1_late.underlying, w1_late.strike));
        assert_eq!((w2.underlying, w2.strike), (w2_early.underlying, w2_early.strike));

        // 3:1 split of both legs
        assert_eq!(w1.underlying, 3 * w2.underlying);
        assert_eq!(w1.strike, 3 * w2.strike);
        assert_eq!(w1.underlying + w2.underlying, 200_000_000);
    }

    #[test]
    fn exercise_is_socialized_across_writers() {
        let run = |source: u8| {
            let mut pool = Pool::new(OptionType::Call, 7_000_000_000);
            pool.mint(WRITER, 500).unwrap();
            pool.mint(OTHER_WRITER, 500).unwrap();
            pool.transfer(source, HOLDER, 250);
            pool.exercise(HOLDER, 250).unwrap();
            (pool.withdraw(WRITER).unwrap(), pool.withdraw(OTHER_WRITER).unwrap())
        };

        let from_first = run(WRITER);
        let from_second = run(OTHER_WRITER);
        assert_eq!(from_first, from_second);
        assert_eq!(from_first.0.underlying, from_first.1.underlying);
        assert_eq!(from_first.0.strike, from_first.1.strike);
    }

    #[test]
    fn call_exercise_moves_strike_into_the_pool() {
        let mut pool = Pool::new(OptionType::Call, 7_000_000_000);
        pool.mint(WRITER, 100_000_000).unwrap();
        pool.transfer(WRITER, HOLDER, 40_000_000);

        let terms = pool.exercise(HOLDER, 40_000_000).unwrap();
        assert_eq!(terms.pay_in, 2_800_000_000);
        assert_eq!(terms.pay_out, 40_000_000);

        let payout = pool.withdraw(WRITER).unwrap();
        assert_eq!(payout.underlying, 60_000_000);
        assert_eq!(payout.strike, 2_800_000_000);
    }

    #[test]
    fn exercise_requires_holding_the_options() {
        let mut pool = Pool::new(OptionType::Put, 7_000_000_000);
        pool.mint(WRITER, 1_000).unwrap();
        assert_fails(pool.exercise(HOLDER, 1), ErrorCode::InsufficientOptionBalance);
        assert_fails(pool.exercise(WRITER, 0), ErrorCode::InvalidAmount);
    }

    #[test]
    fn dust_exercise_is_rejected() {
        let mut pool = Pool::new(OptionType::Put, 3);
        pool.mint(WRITER, 10).unwrap();
        // 10 raw options at 3 / 1e8 are worth less than one raw strike unit
        assert_fails(pool.exercise(WRITER, 10), ErrorCode::AmountTooLow);
    }

    #[test]
    fn mint_that_buys_no_shares_is_rejected() {
        let mut pool = Pool::new(OptionType::Call, 7_000_000_000);
        pool.mint(WRITER, 10).unwrap();
        pool.accrue(20_000);
        assert_eq!(pool.reserves.underlying, 30);

        assert_fails(pool.mint(OTHER_WRITER, 1), ErrorCode::AmountTooLow);
        let receipt = pool.mint(OTHER_WRITER, 3).unwrap();
        assert_eq!(receipt.shares, 1);
    }

    #[test]
    fn mint_after_donation_keeps_the_deposit_whole() {
        let mut pool = Pool::new(OptionType::Call, 7_000_000_000);
        pool.mint(WRITER, 10).unwrap();
        pool.donate(990);

        // one share is now worth 100 units; 199 would buy a single share
        assert_fails(pool.mint(OTHER_WRITER, 199), ErrorCode::AmountTooLow);
        assert_eq!(pool.position(OTHER_WRITER), WriterPosition::default());

        let receipt = pool.mint(OTHER_WRITER, 200).unwrap();
        assert_eq!(receipt.shares, 2);
        let payout = pool.unmint(OTHER_WRITER, 200).unwrap();
        assert_eq!(payout.underlying, receipt.collateral);
        assert_eq!(pool.reserves.underlying, 1_000);
        pool.assert_ledger_consistent();
    }

    #[test]
    fn inflated_share_price_cannot_capture_a_later_deposit() {
        let mut pool = Pool::new(OptionType::Call, 7_000_000_000);
        pool.mint(WRITER, 1).unwrap();
        pool.donate(1_000_000);

        assert_fails(pool.mint(OTHER_WRITER, 500_000), ErrorCode::AmountTooLow);
        assert_fails(pool.mint(OTHER_WRITER, 1_500_000), ErrorCode::AmountTooLow);

        let receipt = pool.mint(OTHER_WRITER, 2_000_002).unwrap();
        let payout = pool.unmint(OTHER_WRITER, 2_000_002).unwrap();
        assert!(receipt.collateral - payout.underlying <= 1);
    }

    #[test]
    fn put_claims_follow_collateral_not_locked_amount() {
        // 3 raw strike units per whole underlying: one raw option still costs one unit
        let mut pool = Pool::new(OptionType::Put, 3);
        let small = pool.mint(WRITER, 1).unwrap();
        let large = pool.mint(OTHER_WRITER, 100_000_000).unwrap();
        assert_eq!((small.collateral, small.shares), (1, 1));
        assert_eq!((large.collateral, large.shares), (3, 3));

        assert_eq!(pool.withdraw(WRITER).unwrap().strike, 1);
        assert_eq!(pool.withdraw(OTHER_WRITER).unwrap().strike, 3);
        assert_eq!(pool.reserves, Reserves::default());
    }

    #[test]
    fn interest_never_shrinks_a_withdrawal() {
        let mut pool = Pool::new(OptionType::Call, 7_000_000_000);
        let receipt = pool.mint(WRITER, 123_456_789).unwrap();
        pool.accrue(37);
        let payout = pool.withdraw(WRITER).unwrap();
        assert!(payout.underlying >= receipt.collateral);
        assert_eq!(pool.reserves.underlying, 0);
    }

    #[test]
    fn preview_matches_withdraw_and_is_read_only() {
        let mut pool = Pool::new(OptionType::Put, 7_000_000_000);
        pool.mint(WRITER, 300).unwrap();
        pool.mint(OTHER_WRITER, 100).unwrap();

        let position = pool.position(WRITER);
        let preview = preview_withdraw(&pool.series, &position, pool.reserves).unwrap();
        assert_eq!(pool.position(WRITER), position);

        let payout = pool.withdraw(WRITER).unwrap();
        assert_eq!(preview, payout);
        assert_eq!(
            preview_withdraw(&pool.series, &pool.position(WRITER), pool.reserves).unwrap(),
            Payout::default()
        );
    }

    #[test]
    fn rewards_split_by_shares() {
        let mut pool = Pool::new(OptionType::Put, 7_000_000_000);
        pool.mint(WRITER, 300).unwrap();
        pool.mint(OTHER_WRITER, 100).unwrap();

        let shares = pool.position(WRITER).shares;
        assert_eq!(reward_share(&pool.series, shares, 1_000).unwrap(), 750);
        assert_eq!(reward_share(&pool.series, 0, 1_000).unwrap(), 0);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Mint { writer: u8, amount: u64 },
        Unmint { writer: u8, amount: u64 },
        Give { writer: u8, amount: u64 },
        Accrue { bps: u64 },
        Donate { amount: u64 },
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..3, 1u64..5_000_000_000).prop_map(|(writer, amount)| Op::Mint { writer, amount }),
            (0u8..3, 1u64..5_000_000_000).prop_map(|(writer, amount)| Op::Unmint { writer, amount }),
            (0u8..3, 1u64..5_000_000_000).prop_map(|(writer, amount)| Op::Give { writer, amount }),
            (1u64..500).prop_map(|bps| Op::Accrue { bps }),
            (1u64..1_000_000).prop_map(|amount| Op::Donate { amount }),
        ]
    }

    proptest! {
        #[test]
        fn pool_stays_solvent_and_closes_out_to_zero(
            is_put in any::<bool>(),
            strike_price in 1u64..50_000_000_000,
            ops in prop::collection::vec(op(), 1..40),
            exercises in prop::collection::vec(0u64..=100, 0..5),
        ) {
            let option_type = if is_put { OptionType::Put } else { OptionType::Call };
            let mut pool = Pool::new(option_type, strike_price);

            for op in ops {
                match op {
                    Op::Mint { writer, amount } => {
                        // a fresh writer minting and unminting at once loses at most one unit
                        let mut trial = pool.clone();
                        if let Ok(receipt) = trial.mint(ROUND_TRIP, amount) {
                            match trial.unmint(ROUND_TRIP, amount) {
                                Ok(payout) => prop_assert!(
                                    receipt.collateral.saturating_sub(payout.collateral(option_type)) <= 1
                                ),
                                Err(_) => prop_assert!(receipt.collateral <= 1),
                            }
                        }
                        let _ = pool.mint(writer, amount);
                    }
                    Op::Unmint { writer, amount } => {
                        let locked = pool.position(writer).locked_amount;
                        let amount = amount % (locked + 1);
                        let _ = pool.unmint(writer, amount);
                    }
                    Op::Give { writer, amount } => {
                        let amount = amount % (pool.balance(writer) + 1);
                        pool.transfer(writer, HOLDER, amount);
                    }
                    Op::Accrue { bps } => pool.accrue(bps),
                    // an orphaned donation would stay in the vault after close-out
                    Op::Donate { amount } if pool.series.total_shares > 0 => pool.donate(amount),
                    Op::Donate { .. } => {}
                }
                pool.assert_ledger_consistent();
                prop_assert_eq!(pool.series.total_locked, pool.supply);
                // every outstanding option can still be exercised in full
                let owed = pool.series.exercise_terms(pool.supply).unwrap().pay_out;
                prop_assert!(pool.reserves.collateral(option_type) >= owed);
            }

            for pct in exercises {
                let amount = pool.balance(HOLDER) * pct / 100;
                if amount == 0 || pool.series.exercise_terms(amount).unwrap().pay_out == 0 {
                    continue;
                }
                prop_assert!(pool.exercise(HOLDER, amount).is_ok());
            }

            let writers: Vec<u8> = pool.positions.keys().copied().collect();
            for writer in writers {
                if pool.position(writer).shares > 0 {
                    prop_assert!(pool.withdraw(writer).is_ok());
                }
            }
            prop_assert_eq!(pool.reserves, Reserves::default());
            prop_assert_eq!(pool.series.total_shares, 0);
        }
    }
}
