pub const SERIES_SEED: &[u8] = b"series";
pub const OPTION_MINT_SEED: &[u8] = b"option_mint";
pub const UNDERLYING_VAULT_SEED: &[u8] = b"underlying_vault";
pub const STRIKE_VAULT_SEED: &[u8] = b"strike_vault";
pub const NATIVE_VAULT_SEED: &[u8] = b"native_vault";
pub const REWARD_VAULT_SEED: &[u8] = b"reward_vault";
pub const POSITION_SEED: &[u8] = b"position";
pub const GUARD_SEED: &[u8] = b"guard";

/// Minimum length of the exercise window, in seconds (24h).
pub const MIN_EXERCISE_WINDOW: i64 = 86_400;

/// Largest mint decimals accepted for either leg of a series.
pub const MAX_DECIMALS: u8 = 18;
