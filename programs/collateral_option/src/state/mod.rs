pub mod guard;
pub mod native_vault;
pub mod position;
pub mod series;

pub use guard::*;
pub use native_vault::*;
pub use position::*;
pub use series::*;
