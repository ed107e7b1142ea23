//! Double-SHA256 hashing for content addressing.
//!
//! This module provides the chain's two-round digest ([`Hasher`]) and the
//! multihash identifier ([`HashFunction`]) that tags every digest it produces.

pub mod constants;
pub mod function;
pub mod hasher;

pub use constants::*;
pub use function::HashFunction;
pub use hasher::Hasher;
