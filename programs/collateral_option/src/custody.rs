//! Where a series keeps each leg, and how assets move in and out of it.
//!
//! Settlement handlers are written once against [`Custody`]; token vaults and
//! the native lamport vault plug in underneath.

use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::{Mint, TokenAccount};
use anchor_spl::token_interface as token;

use crate::errors::ErrorCode;
use crate::settlement::Reserves;
use crate::state::NativeVault;

pub trait Custody<'info> {
    /// Balance currently held, including anything that arrived on its own.
    fn reserve(&self) -> Result<u64>;

    /// Pulls `amount` from `from`, signed by `authority`.
    fn deposit(
        &self,
        from: &AccountInfo<'info>,
        authority: &AccountInfo<'info>,
        amount: u64,
    ) -> Result<()>;

    /// Pays `amount` to `to`, signed by the series PDA.
    fn release(
        &self,
        to: &AccountInfo<'info>,
        amount: u64,
        signer_seeds: &[&[&[u8]]],
    ) -> Result<()>;
}

/// SPL token vault owned by the series PDA.
pub struct TokenCustody<'a, 'info> {
    pub vault: &'a Account<'info, TokenAccount>,
    pub mint: &'a Account<'info, Mint>,
    pub series: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
}

impl<'a, 'info> Custody<'info> for TokenCustody<'a, 'info> {
    fn reserve(&self) -> Result<u64> {
        Ok(self.vault.amount)
    }

    fn deposit(
        &self,
        from: &AccountInfo<'info>,
        authority: &AccountInfo<'info>,
        amount: u64,
    ) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        token::transfer_checked(
            CpiContext::new(
                self.token_program.clone(),
                token::TransferChecked {
                    from: from.clone(),
                    mint: self.mint.to_account_info(),
                    to: self.vault.to_account_info(),
                    authority: authority.clone(),
                },
            ),
            amount,
            self.mint.decimals,
        )
    }

    fn release(
        &self,
        to: &AccountInfo<'info>,
        amount: u64,
        signer_seeds: &[&[&[u8]]],
    ) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        token::transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.clone(),
                token::TransferChecked {
                    from: self.vault.to_account_info(),
                    mint: self.mint.to_account_info(),
                    to: to.clone(),
                    authority: self.series.clone(),
                },
                signer_seeds,
            ),
            amount,
            self.mint.decimals,
        )
    }
}

/// Lamports held directly by a program-owned [`NativeVault`].
pub struct NativeCustody<'a, 'info> {
    pub vault: &'a Account<'info, NativeVault>,
    pub system_program: AccountInfo<'info>,
}

impl<'a, 'info> Custody<'info> for NativeCustody<'a, 'info> {
    fn reserve(&self) -> Result<u64> {
        native_reserve(&self.vault.to_account_info())
    }

    fn deposit(
        &self,
        from: &AccountInfo<'info>,
        _authority: &AccountInfo<'info>,
        amount: u64,
    ) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        system_program::transfer(
            CpiContext::new(
                self.system_program.clone(),
                system_program::Transfer {
                    from: from.clone(),
                    to: self.vault.to_account_info(),
                },
            ),
            amount,
        )
    }

    /// The vault is owned by this program, so lamports are moved directly.
    fn release(
        &self,
        to: &AccountInfo<'info>,
        amount: u64,
        _signer_seeds: &[&[&[u8]]],
    ) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        let vault = self.vault.to_account_info();
        let vault_balance = vault
            .lamports()
            .checked_sub(amount)
            .ok_or(ErrorCode::InsufficientCollateral)?;
        let recipient_balance = to
            .lamports()
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;

        **vault.try_borrow_mut_lamports()? = vault_balance;
        **to.try_borrow_mut_lamports()? = recipient_balance;
        Ok(())
    }
}

/// Lamports above the rent-exempt minimum of a native vault.
pub fn native_reserve(vault: &AccountInfo) -> Result<u64> {
    let rent_exempt = Rent::get()?.minimum_balance(vault.data_len());
    Ok(vault.lamports().saturating_sub(rent_exempt))
}

pub fn read_reserves<'info>(
    underlying: &dyn Custody<'info>,
    strike: &dyn Custody<'info>,
) -> Result<Reserves> {
    Ok(Reserves {
        underlying: underlying.reserve()?,
        strike: strike.reserve()?,
    })
}

/// Pays both legs of a writer payout.
pub fn release_both<'info>(
    underlying: &dyn Custody<'info>,
    strike: &dyn Custody<'info>,
    to_underlying: &AccountInfo<'info>,
    to_strike: &AccountInfo<'info>,
    underlying_amount: u64,
    strike_amount: u64,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    underlying.release(to_underlying, underlying_amount, signer_seeds)?;
    strike.release(to_strike, strike_amount, signer_seeds)
}
