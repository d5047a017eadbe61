//! Basic types

mod int;
pub use int::{ParseI256Error, I256, U256, U64};
