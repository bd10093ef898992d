use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    // Series configuration
    #[msg("Expiration must be in the future")]
    ExpirationInPast,

    #[msg("Strike price must be greater than zero")]
    InvalidStrikePrice,

    #[msg("Exercise window is shorter than the minimum")]
    ExerciseWindowTooShort,

    #[msg("Underlying and strike assets must differ")]
    DuplicateAssets,

    #[msg("Invalid asset address")]
    InvalidAsset,

    #[msg("Asset decimals are not supported")]
    UnsupportedDecimals,

    #[msg("Exercise type is not supported")]
    UnsupportedExerciseType,

    #[msg("Invalid underlying mint")]
    InvalidUnderlyingMint,

    #[msg("Invalid strike mint")]
    InvalidStrikeMint,

    #[msg("Invalid option mint")]
    InvalidOptionMint,

    #[msg("Invalid vault")]
    InvalidVault,

    #[msg("Instruction does not match the series collateral kind")]
    InvalidSeriesKind,

    #[msg("Token account does not match the series asset")]
    InvalidTokenAccount,

    #[msg("Invalid user")]
    InvalidUser,

    // Phase
    #[msg("Option has expired")]
    OptionExpired,

    #[msg("Option has not expired yet")]
    OptionNotExpired,

    #[msg("Exercise window has closed")]
    ExerciseWindowClosed,

    #[msg("Withdraw is only allowed after the exercise window")]
    WithdrawWindowNotOpen,

    // Amounts
    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Amount too low")]
    AmountTooLow,

    #[msg("Not enough option tokens")]
    InsufficientOptionBalance,

    #[msg("Amount exceeds the options minted by this writer")]
    ExceedsLockedAmount,

    #[msg("No balance to withdraw")]
    NothingToWithdraw,

    #[msg("Insufficient collateral in vault")]
    InsufficientCollateral,

    // Policies
    #[msg("Series is stopped")]
    SeriesStopped,

    #[msg("Capacity exceeded")]
    CapacityExceeded,

    #[msg("Only the series authority can do this")]
    Unauthorized,

    #[msg("Rewards are not configured for this series")]
    RewardsNotConfigured,

    #[msg("Invalid reward distributor")]
    InvalidRewardDistributor,

    // Arithmetic
    #[msg("Math operation overflow")]
    MathOverflow,
}
