//! Multihash function identifiers.

use core::fmt;

use super::constants::DIGEST_SIZE;

/// Hash function tag carried inside a multihash.
///
/// Only the chain's own digest is supported. Decoding an address that names
/// any other function fails with
/// [`PrimitivesError::UnsupportedHash`](crate::PrimitivesError::UnsupportedHash).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(strum::IntoStaticStr)]
#[derive(strum::EnumString)]
#[derive(num_enum::TryFromPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[repr(u64)]
#[non_exhaustive]
pub enum HashFunction {
    /// SHA-256 applied twice (multihash `dbl-sha2-256`, code `0x56`).
    #[strum(to_string = "dbl-sha2-256")]
    #[cfg_attr(feature = "serde", serde(rename = "dbl-sha2-256"))]
    DoubleSha256 = 0x56,
}

impl HashFunction {
    /// Returns the multihash code.
    #[inline]
    pub const fn code(self) -> u64 {
        self as u64
    }

    /// Returns the digest length in bytes.
    #[inline]
    pub const fn digest_size(self) -> usize {
        match self {
            Self::DoubleSha256 => DIGEST_SIZE,
        }
    }

    /// Returns the multihash name.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Looks up a hash function by its multihash code.
    #[inline]
    pub fn from_code(code: u64) -> crate::Result<Self> {
        Self::try_from(code).map_err(|e| crate::PrimitivesError::UnsupportedHash(e.number))
    }
}

impl Default for HashFunction {
    #[inline]
    fn default() -> Self {
        Self::DoubleSha256
    }
}

impl fmt::Display for HashFunction {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_str().fmt(f)
    }
}
