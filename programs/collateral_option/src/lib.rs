use anchor_lang::prelude::*;

use instructions::*;

pub mod constants;
pub mod custody;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod settlement;
pub mod state;
pub mod utils;

// Re-export at crate root for Anchor's macro expansion
pub use instructions::{
    ConfigureRewards, CreateNativeSeries, CreateSeries, HolderContext, NativeHolderContext,
    NativeWriterContext, PreviewWithdraw, SeriesParams, UpdateGuard, WithdrawPreview,
    WriterContext, WriterRewardContext,
};


declare_id!("5YmQRcR3EcFerQfAsdd6VaHNUyuwEbcRGLqyRP5WnLkN");


#[program]
pub mod collateral_option {
    use super::*;

    /// CreateSeries: Initializes OptionSeries + option mint + token vaults + guard
    pub fn create_series(ctx: Context<CreateSeries>, params: SeriesParams) -> Result<()> {
        instructions::create_series::handler(ctx, params)
    }

    /// CreateNativeSeries: same, with the underlying held as lamports
    pub fn create_native_series(
        ctx: Context<CreateNativeSeries>,
        params: SeriesParams,
    ) -> Result<()> {
        instructions::create_native_series::handler(ctx, params)
    }

    /// Authority-only: attach a reward distributor to a YieldBearing series
    pub fn configure_rewards(ctx: Context<ConfigureRewards>) -> Result<()> {
        instructions::configure_rewards::handler(ctx)
    }

    /// Authority-only: pause flag and supply cap
    pub fn update_guard(ctx: Context<UpdateGuard>, stopped: bool, capacity: u64) -> Result<()> {
        instructions::update_guard::handler(ctx, stopped, capacity)
    }

    /// Mint: lock collateral → options to the beneficiary account, claim to the writer
    pub fn mint(ctx: Context<WriterContext>, amount: u64) -> Result<()> {
        instructions::mint_options::handler(ctx, amount)
    }

    /// Unmint: burn own options before expiry → pro-rata share of reserves
    pub fn unmint(ctx: Context<WriterContext>, amount: u64) -> Result<()> {
        instructions::unmint::handler(ctx, amount)
    }

    /// Exercise: burn options, pay the other leg → receive collateral
    pub fn exercise(ctx: Context<HolderContext>, amount: u64) -> Result<()> {
        instructions::exercise::handler(ctx, amount)
    }

    /// Withdraw: after the exercise window, the writer's whole share of both reserves
    pub fn withdraw(ctx: Context<WriterContext>) -> Result<()> {
        instructions::withdraw::handler(ctx)
    }

    pub fn mint_native(ctx: Context<NativeWriterContext>, amount: u64) -> Result<()> {
        instructions::native::mint_handler(ctx, amount)
    }

    pub fn unmint_native(ctx: Context<NativeWriterContext>, amount: u64) -> Result<()> {
        instructions::native::unmint_handler(ctx, amount)
    }

    pub fn exercise_native(ctx: Context<NativeHolderContext>, amount: u64) -> Result<()> {
        instructions::native::exercise_handler(ctx, amount)
    }

    pub fn withdraw_native(ctx: Context<NativeWriterContext>) -> Result<()> {
        instructions::native::withdraw_handler(ctx)
    }

    /// Unmint on a YieldBearing series, also paying harvested rewards
    pub fn unmint_with_rewards(ctx: Context<WriterRewardContext>, amount: u64) -> Result<()> {
        instructions::rewards::unmint_handler(ctx, amount)
    }

    /// Withdraw on a YieldBearing series, also paying harvested rewards
    pub fn withdraw_with_rewards(ctx: Context<WriterRewardContext>) -> Result<()> {
        instructions::rewards::withdraw_handler(ctx)
    }

    /// Read-only: (underlying, strike) `writer` would receive from withdraw now
    pub fn preview_withdraw(
        ctx: Context<PreviewWithdraw>,
        writer: Pubkey,
    ) -> Result<WithdrawPreview> {
        instructions::preview_withdraw::handler(ctx, writer)
    }
}
