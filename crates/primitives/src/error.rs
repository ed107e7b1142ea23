//! Error types for the blockgraph-primitives crate
//!
//! Every fallible operation in this crate returns [`PrimitivesError`]. The
//! decoders built on top of it wrap this type rather than flattening it, so a
//! caller can always tell an addressing problem from a wire-format problem.
//!
//! ## Example Usage
//!
//! ```
//! use blockgraph_primitives::{ContentAddress, PrimitivesError};
//!
//! match ContentAddress::from_bytes(&[0x01, 0x70]) {
//!     Err(PrimitivesError::UnknownCodec(code)) => assert_eq!(code, 0x70),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use thiserror::Error;

/// Result type for operations in the primitives crate
pub type Result<T> = std::result::Result<T, PrimitivesError>;

/// Main error type for the primitives crate
#[derive(Error, Debug)]
pub enum PrimitivesError {
    /// The bytes or text do not form a content address this crate produces
    #[error("Invalid content address: {0}")]
    InvalidAddress(String),

    /// The multicodec tag is not one of the block graph codecs
    #[error("Unknown codec: {0:#x}")]
    UnknownCodec(u64),

    /// The multihash names a hash function other than double-SHA256
    #[error("Unsupported hash function: {0:#x}")]
    UnsupportedHash(u64),

    /// Array conversion errors
    #[error("Array conversion error: {0}")]
    ArrayConversion(#[from] std::array::TryFromSliceError),

    /// Hex decoding errors
    #[error("Hex decoding error: {0}")]
    Hex(#[from] alloy_primitives::hex::FromHexError),
}

impl PrimitivesError {
    /// Build an [`PrimitivesError::InvalidAddress`] from any message
    pub fn invalid_address<S: Into<String>>(msg: S) -> Self {
        Self::InvalidAddress(msg.into())
    }
}
