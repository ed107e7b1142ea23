//! Content address implementation
//!
//! This module provides [`ContentAddress`], the self-describing identifier used
//! to name every node of a block graph. An address is a version 1 CID: a
//! multicodec tag ([`Codec`]) plus a multihash ([`Multihash`]) carrying the
//! double-SHA256 digest of the node's serialized bytes.
//!
//! ## Binary layout
//!
//! ```text
//! varint(1) | varint(codec) | varint(0x56) | varint(32) | digest (32 bytes)
//! ```
//!
//! ## Example Usage
//!
//! ```
//! use blockgraph_primitives::{Codec, ContentAddress};
//!
//! let address = ContentAddress::compute(Codec::BitcoinTx, b"raw transaction bytes");
//! let bytes = address.to_bytes();
//! assert_eq!(ContentAddress::from_bytes(&bytes).unwrap(), address);
//!
//! // Multibase base16 text form
//! let text = address.to_string();
//! assert!(text.starts_with('f'));
//! assert_eq!(text.parse::<ContentAddress>().unwrap(), address);
//! ```

use std::fmt;
use std::str::FromStr;

use alloy_primitives::{B256, hex};
use bytes::{BufMut, Bytes, BytesMut};
use digest::{Digest, typenum::U32};

use crate::codec::Codec;
use crate::error::{PrimitivesError, Result};
use crate::hash::{DIGEST_SIZE, HashFunction, Hasher};

/// CID version written by [`ContentAddress::to_bytes`]
pub const CID_VERSION: u64 = 1;

/// Multibase prefix for lowercase base16
const MULTIBASE_BASE16: char = 'f';

/// Longest unsigned varint accepted when decoding (multiformats limit)
const MAX_VARINT_LEN: usize = 9;

/// A digest tagged with the hash function that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct Multihash {
    code: HashFunction,
    digest: B256,
}

impl Multihash {
    /// Wrap an existing digest
    #[inline]
    pub const fn new(code: HashFunction, digest: B256) -> Self {
        Self { code, digest }
    }

    /// Double-SHA256 `data` and wrap the result
    #[inline]
    pub fn double_sha256(data: &[u8]) -> Self {
        Self::compute_with::<Hasher>(HashFunction::DoubleSha256, data)
    }

    /// Hash `data` with any 32-byte [`Digest`] and tag the result with `code`
    #[inline]
    pub fn compute_with<D: Digest<OutputSize = U32>>(code: HashFunction, data: &[u8]) -> Self {
        Self::new(code, B256::from_slice(&D::digest(data)))
    }

    /// The hash function identifier
    #[inline]
    pub const fn code(&self) -> HashFunction {
        self.code
    }

    /// The raw digest
    #[inline]
    pub const fn digest(&self) -> &B256 {
        &self.digest
    }

    /// Encoded length of this multihash in bytes
    pub fn encoded_len(&self) -> usize {
        uvarint_len(self.code.code()) + uvarint_len(DIGEST_SIZE as u64) + DIGEST_SIZE
    }

    fn write_to(&self, buf: &mut BytesMut) {
        put_uvarint(buf, self.code.code());
        put_uvarint(buf, DIGEST_SIZE as u64);
        buf.put_slice(self.digest.as_slice());
    }
}

/// A self-describing content address (CID v1).
///
/// Two addresses are equal iff their codec, hash function and digest are all
/// equal. Addresses are plain values: copying one never touches the content
/// it names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct ContentAddress {
    codec: Codec,
    hash: Multihash,
}

impl ContentAddress {
    /// Creates an address from its parts
    #[inline]
    pub const fn new(codec: Codec, hash: Multihash) -> Self {
        Self { codec, hash }
    }

    /// Computes the address of `data`: its double-SHA256 digest tagged with `codec`.
    #[inline]
    pub fn compute(codec: Codec, data: &[u8]) -> Self {
        Self::new(codec, Multihash::double_sha256(data))
    }

    /// Wraps a digest that is already known, e.g. a hash field read from a header.
    #[inline]
    pub const fn from_digest(codec: Codec, digest: B256) -> Self {
        Self::new(codec, Multihash::new(HashFunction::DoubleSha256, digest))
    }

    /// Wraps a 32-byte slice as a double-SHA256 digest, checking the length
    pub fn from_digest_slice(codec: Codec, slice: &[u8]) -> Result<Self> {
        let digest = B256::try_from(slice)?;
        Ok(Self::from_digest(codec, digest))
    }

    /// The content type tag
    #[inline]
    pub const fn codec(&self) -> Codec {
        self.codec
    }

    /// The multihash (hash function and digest)
    #[inline]
    pub const fn hash(&self) -> &Multihash {
        &self.hash
    }

    /// The hash function identifier
    #[inline]
    pub const fn hash_function(&self) -> HashFunction {
        self.hash.code
    }

    /// The raw digest, in the byte order it appears on the wire
    #[inline]
    pub const fn digest(&self) -> &B256 {
        &self.hash.digest
    }

    /// Returns the digest bytes
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.hash.digest.as_slice()
    }

    /// Checks if the digest is all zeros
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.hash.digest.is_zero()
    }

    /// Hex of the digest in reversed byte order, as block explorers print
    /// block hashes and transaction ids.
    pub fn to_reversed_hex(&self) -> String {
        let mut bytes = self.hash.digest.0;
        bytes.reverse();
        hex::encode(bytes)
    }

    /// Encoded length of this address in bytes
    pub fn encoded_len(&self) -> usize {
        uvarint_len(CID_VERSION) + uvarint_len(self.codec.code()) + self.hash.encoded_len()
    }

    /// Serializes the address in binary CID form
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        put_uvarint(&mut buf, CID_VERSION);
        put_uvarint(&mut buf, self.codec.code());
        self.hash.write_to(&mut buf);
        buf.freeze()
    }

    /// Parses a binary CID, rejecting anything this crate would not produce.
    pub fn from_bytes(mut buf: &[u8]) -> Result<Self> {
        let version = take_uvarint(&mut buf)?;
        if version != CID_VERSION {
            return Err(PrimitivesError::invalid_address(format!(
                "unsupported CID version {version}"
            )));
        }

        let codec = Codec::from_code(take_uvarint(&mut buf)?)?;
        let code = HashFunction::from_code(take_uvarint(&mut buf)?)?;

        let len = take_uvarint(&mut buf)?;
        if len != code.digest_size() as u64 {
            return Err(PrimitivesError::invalid_address(format!(
                "digest length {len}, expected {}",
                code.digest_size()
            )));
        }
        if buf.len() != DIGEST_SIZE {
            return Err(PrimitivesError::invalid_address(format!(
                "{} digest bytes follow the header, expected {DIGEST_SIZE}",
                buf.len()
            )));
        }

        Ok(Self::new(codec, Multihash::new(code, B256::from_slice(buf))))
    }
}

impl fmt::Display for ContentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{MULTIBASE_BASE16}{}", hex::encode(self.to_bytes()))
    }
}

impl FromStr for ContentAddress {
    type Err = PrimitivesError;

    fn from_str(s: &str) -> Result<Self> {
        let Some(encoded) = s.strip_prefix(MULTIBASE_BASE16) else {
            return Err(PrimitivesError::invalid_address(
                "expected multibase base16 prefix 'f'",
            ));
        };
        Self::from_bytes(&hex::decode(encoded)?)
    }
}

impl AsRef<[u8]> for ContentAddress {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<ContentAddress> for B256 {
    fn from(address: ContentAddress) -> Self {
        address.hash.digest
    }
}

impl TryFrom<&[u8]> for ContentAddress {
    type Error = PrimitivesError;

    fn try_from(buf: &[u8]) -> Result<Self> {
        Self::from_bytes(buf)
    }
}

impl From<ContentAddress> for Bytes {
    fn from(address: ContentAddress) -> Self {
        address.to_bytes()
    }
}

/// Length of `value` as an unsigned LEB128 varint
const fn uvarint_len(mut value: u64) -> usize {
    let mut len = 1;
    while value >= 0x80 {
        value >>= 7;
        len += 1;
    }
    len
}

fn put_uvarint(buf: &mut BytesMut, mut value: u64) {
    while value >= 0x80 {
        buf.put_u8((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    buf.put_u8(value as u8);
}

fn take_uvarint(buf: &mut &[u8]) -> Result<u64> {
    let bytes = *buf;
    let mut value = 0u64;
    for (i, &byte) in bytes.iter().enumerate().take(MAX_VARINT_LEN) {
        value |= u64::from(byte & 0x7f) << (7 * i);
        if byte & 0x80 == 0 {
            if byte == 0 && i > 0 {
                return Err(PrimitivesError::invalid_address("varint is not minimal"));
            }
            *buf = &bytes[i + 1..];
            return Ok(value);
        }
    }
    Err(PrimitivesError::invalid_address("truncated or overlong varint"))
}
