//! Double-SHA256 hasher implementation
//!
//! This module provides the chain's two-round digest, `SHA256(SHA256(data))`,
//! behind the `digest` crate traits so it can be used anywhere a regular hash
//! function is expected.

use alloy_primitives::B256;
use digest::{FixedOutput, HashMarker, OutputSizeUser, Update};
use generic_array::{GenericArray, typenum::U32};
use sha2::{Digest, Sha256};

use super::constants::DIGEST_PAIR_LENGTH;

/// Incremental double-SHA256 hasher.
///
/// Data is streamed into the first SHA-256 round; the second round runs over
/// the 32-byte output of the first when the digest is taken.
#[derive(Debug, Clone, Default)]
pub struct Hasher {
    inner: Sha256,
    len: u64,
}

impl Hasher {
    /// Create a new hasher with no data
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes fed to the hasher so far
    #[inline(always)]
    pub const fn len(&self) -> u64 {
        self.len
    }

    /// Check if no data has been fed yet
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Update the hasher with more data
    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.inner, data);
        self.len += data.len() as u64;
    }

    /// Compute the digest of everything written so far (non-destructive)
    #[inline]
    #[must_use]
    pub fn sum(&self) -> B256 {
        Self::second_round(self.inner.clone().finalize().as_slice())
    }

    /// One-shot double-SHA256 of `data`
    #[inline]
    #[must_use]
    pub fn digest(data: &[u8]) -> B256 {
        Self::second_round(Sha256::digest(data).as_slice())
    }

    /// Double-SHA256 of the concatenation `left || right`.
    ///
    /// This is the pairing rule for merkle tree nodes.
    #[inline]
    #[must_use]
    pub fn digest_pair(left: &B256, right: &B256) -> B256 {
        let mut buf = [0u8; DIGEST_PAIR_LENGTH];
        buf[..32].copy_from_slice(left.as_slice());
        buf[32..].copy_from_slice(right.as_slice());
        Self::digest(&buf)
    }

    #[inline(always)]
    fn second_round(first: &[u8]) -> B256 {
        B256::from_slice(Sha256::digest(first).as_slice())
    }
}

impl OutputSizeUser for Hasher {
    type OutputSize = U32;
}

impl Update for Hasher {
    #[inline]
    fn update(&mut self, data: &[u8]) {
        Self::update(self, data);
    }
}

impl FixedOutput for Hasher {
    #[inline]
    fn finalize_into(self, out: &mut GenericArray<u8, Self::OutputSize>) {
        out.copy_from_slice(self.sum().as_slice());
    }
}

impl HashMarker for Hasher {}
