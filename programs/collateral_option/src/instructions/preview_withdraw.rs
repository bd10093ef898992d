use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::constants::POSITION_SEED;
use crate::custody::native_reserve;
use crate::errors::ErrorCode;
use crate::settlement::{self, Reserves};
use crate::state::{CollateralKind, OptionSeries, WriterPosition};

/// What `withdraw` would pay `writer` against the current reserves.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WithdrawPreview {
    pub underlying_amount: u64,
    pub strike_amount: u64,
}

#[derive(Accounts)]
#[instruction(writer: Pubkey)]
pub struct PreviewWithdraw<'info> {
    #[account(has_one = strike_vault @ ErrorCode::InvalidVault)]
    pub series: Box<Account<'info, OptionSeries>>,

    /// CHECK: token vault, or the native vault of a WrappedNative series
    #[account(address = series.underlying_vault @ ErrorCode::InvalidVault)]
    pub underlying_vault: UncheckedAccount<'info>,

    pub strike_vault: Box<Account<'info, TokenAccount>>,

    /// CHECK: empty when `writer` never minted on this series
    #[account(
        seeds = [POSITION_SEED, series.key().as_ref(), writer.as_ref()],
        bump
    )]
    pub position: UncheckedAccount<'info>,
}

pub fn handler(ctx: Context<PreviewWithdraw>, writer: Pubkey) -> Result<WithdrawPreview> {
    let series = &ctx.accounts.series;

    let underlying_vault = &ctx.accounts.underlying_vault;
    let underlying = match series.kind {
        CollateralKind::WrappedNative => native_reserve(underlying_vault)?,
        CollateralKind::Standard | CollateralKind::YieldBearing => {
            let data = underlying_vault.try_borrow_data()?;
            let vault = TokenAccount::try_deserialize(&mut &data[..])?;
            vault.amount
        }
    };
    let reserves = Reserves {
        underlying,
        strike: ctx.accounts.strike_vault.amount,
    };

    let position_account = &ctx.accounts.position;
    let position = if position_account.data_is_empty() {
        WriterPosition::default()
    } else {
        require_keys_eq!(*position_account.owner, crate::ID, ErrorCode::InvalidUser);
        let data = position_account.try_borrow_data()?;
        let position = WriterPosition::try_deserialize(&mut &data[..])?;
        position
    };

    let payout = settlement::preview_withdraw(series, &position, reserves)?;
    msg!(
        "Withdraw preview for {}: underlying {}, strike {}",
        writer,
        payout.underlying,
        payout.strike
    );

    Ok(WithdrawPreview {
        underlying_amount: payout.underlying,
        strike_amount: payout.strike,
    })
}
