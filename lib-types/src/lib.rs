//! Token platform primitives.
//! Stable, protocol-neutral, behavior-free.

pub mod primitives;

pub use primitives::{Address, Amount, BlockHeight, ETHER};
