//! Content type identification
//!
//! This module provides the [`Codec`] type, the multicodec tag carried by
//! every [`ContentAddress`](crate::ContentAddress). The tag tells a resolver
//! how to interpret the bytes behind an address.

use core::fmt;
use num_enum::TryFromPrimitiveError;

/// Multicodec tag of a block graph node.
///
/// Headers are tagged [`Codec::BitcoinBlock`]. Transactions and merkle tree
/// nodes share [`Codec::BitcoinTx`], since a merkle root addresses either a
/// tree node or, for single-transaction blocks, the transaction itself.
///
/// # Examples
///
/// ```
/// use blockgraph_primitives::Codec;
///
/// assert_eq!(Codec::BitcoinBlock.code(), 0xb0);
/// assert_eq!(Codec::try_from(0xb1u64).unwrap(), Codec::BitcoinTx);
/// assert_eq!("bitcoin-tx".parse::<Codec>().unwrap(), Codec::BitcoinTx);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(strum::IntoStaticStr)]
#[derive(strum::VariantArray)]
#[derive(strum::EnumString)]
#[derive(strum::EnumIter)]
#[derive(num_enum::TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[strum(serialize_all = "kebab-case")]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[repr(u64)]
#[non_exhaustive]
pub enum Codec {
    /// A serialized 80-byte block header (multicodec `0xb0`).
    BitcoinBlock = 0xb0,

    /// A transaction or a transaction merkle tree node (multicodec `0xb1`).
    BitcoinTx = 0xb1,
}

impl Codec {
    /// Returns the multicodec code.
    #[inline]
    pub const fn code(self) -> u64 {
        self as u64
    }

    /// Returns the multicodec name, e.g. `bitcoin-block`.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Looks up a codec by its multicodec code.
    #[inline]
    pub fn from_code(code: u64) -> crate::Result<Self> {
        Self::try_from(code).map_err(|e: TryFromPrimitiveError<Self>| {
            crate::PrimitivesError::UnknownCodec(e.number)
        })
    }
}

impl fmt::Display for Codec {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_str().fmt(f)
    }
}

impl AsRef<str> for Codec {
    #[inline]
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl From<Codec> for u64 {
    #[inline]
    fn from(codec: Codec) -> Self {
        codec.code()
    }
}

impl PartialEq<u64> for Codec {
    #[inline]
    fn eq(&self, other: &u64) -> bool {
        self.code() == *other
    }
}
