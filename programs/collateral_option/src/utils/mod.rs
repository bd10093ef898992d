pub mod pda;
pub mod math;
pub mod rewards;
pub mod validation;

pub use pda::*;
pub use math::*;
pub use rewards::*;
pub use validation::*;
