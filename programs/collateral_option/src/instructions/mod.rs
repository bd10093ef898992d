pub mod common;
pub mod configure_rewards;
pub mod context;
pub mod create_native_series;
pub mod create_series;
pub mod exercise;
pub mod mint_options;
pub mod native;
pub mod preview_withdraw;
pub mod rewards;
pub mod unmint;
pub mod update_guard;
pub mod withdraw;

// Note: Glob imports are required for Anchor's #[program] macro
// The handler name collision is intentional - each module's handler is accessed via module path
#[allow(ambiguous_glob_reexports)]
pub use configure_rewards::*;
#[allow(ambiguous_glob_reexports)]
pub use context::*;
#[allow(ambiguous_glob_reexports)]
pub use create_native_series::*;
#[allow(ambiguous_glob_reexports)]
pub use create_series::*;
#[allow(ambiguous_glob_reexports)]
pub use exercise::*;
#[allow(ambiguous_glob_reexports)]
pub use mint_options::*;
#[allow(ambiguous_glob_reexports)]
pub use native::*;
#[allow(ambiguous_glob_reexports)]
pub use preview_withdraw::*;
#[allow(ambiguous_glob_reexports)]
pub use rewards::*;
#[allow(ambiguous_glob_reexports)]
pub use unmint::*;
#[allow(ambiguous_glob_reexports)]
pub use update_guard::*;
#[allow(ambiguous_glob_reexports)]
pub use withdraw::*;
