use anchor_lang::prelude::*;
use anchor_spl::token_interface as token;

use crate::custody::{read_reserves, Custody};
use crate::settlement::Reserves;
use crate::state::{OptionType, WriterPosition};

/// The two custodies of a series, labelled by what each leg does for the
/// option type at hand.
pub struct Legs<'a, 'info> {
    pub underlying: &'a dyn Custody<'info>,
    pub strike: &'a dyn Custody<'info>,
}

impl<'a, 'info> Legs<'a, 'info> {
    pub fn reserves(&self) -> Result<Reserves> {
        read_reserves(self.underlying, self.strike)
    }

    /// Locked at mint, returned at unmint/withdraw.
    pub fn collateral(&self, option_type: OptionType) -> &'a dyn Custody<'info> {
        match option_type {
            OptionType::Put => self.strike,
            OptionType::Call => self.underlying,
        }
    }

    /// Paid in by the holder on exercise.
    pub fn exercise_input(&self, option_type: OptionType) -> &'a dyn Custody<'info> {
        match option_type {
            OptionType::Put => self.underlying,
            OptionType::Call => self.strike,
        }
    }

    /// Paid out to the holder on exercise.
    pub fn exercise_output(&self, option_type: OptionType) -> &'a dyn Custody<'info> {
        self.collateral(option_type)
    }
}

/// The caller's side of a settlement: a signer plus where each asset lives.
/// For the native leg the "account" is the signer's wallet itself.
pub struct Participant<'info> {
    pub user: AccountInfo<'info>,
    pub underlying_account: AccountInfo<'info>,
    pub strike_account: AccountInfo<'info>,
}

impl<'info> Participant<'info> {
    pub fn collateral_account(&self, option_type: OptionType) -> &AccountInfo<'info> {
        match option_type {
            OptionType::Put => &self.strike_account,
            OptionType::Call => &self.underlying_account,
        }
    }

    /// Account the holder pays from on exercise.
    pub fn exercise_input_account(&self, option_type: OptionType) -> &AccountInfo<'info> {
        match option_type {
            OptionType::Put => &self.underlying_account,
            OptionType::Call => &self.strike_account,
        }
    }
}

/// The series option mint, signed for by the series PDA.
pub struct OptionToken<'info> {
    pub mint: AccountInfo<'info>,
    /// Circulating supply before this instruction.
    pub supply: u64,
    pub authority: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
}

impl<'info> OptionToken<'info> {
    pub fn mint_to(
        &self,
        to: &AccountInfo<'info>,
        amount: u64,
        signer_seeds: &[&[&[u8]]],
    ) -> Result<()> {
        token::mint_to(
            CpiContext::new_with_signer(
                self.token_program.clone(),
                token::MintTo {
                    mint: self.mint.clone(),
                    to: to.clone(),
                    authority: self.authority.clone(),
                },
                signer_seeds,
            ),
            amount,
        )
    }

    pub fn burn(
        &self,
        from: &AccountInfo<'info>,
        owner: &AccountInfo<'info>,
        amount: u64,
    ) -> Result<()> {
        token::burn(
            CpiContext::new(
                self.token_program.clone(),
                token::Burn {
                    mint: self.mint.clone(),
                    from: from.clone(),
                    authority: owner.clone(),
                },
            ),
            amount,
        )
    }
}

/// Stamps a freshly allocated position with its owner.
pub fn open_position(position: &mut WriterPosition, series: Pubkey, writer: Pubkey, bump: u8) {
    if position.is_initialized() {
        return;
    }
    position.series = series;
    position.writer = writer;
    position.bump = bump;
    msg!("Opened writer position for {} on series {}", writer, series);
}
