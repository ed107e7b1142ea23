//! Block header decoding
//!
//! The header is the fixed 80-byte prefix of a block message:
//!
//! ```text
//! | version (4, LE) | prev_block (32) | merkle_root (32) | timestamp (4, LE) | bits (4, LE) | nonce (4, LE) |
//! ```
//!
//! Both hash fields become [`ContentAddress`]es: the previous block is
//! addressed as a header (`bitcoin-block`), the merkle root as a transaction
//! tree node (`bitcoin-tx`).

use std::fmt;

use byteorder::{ByteOrder, LittleEndian};
use bytes::{BufMut, Bytes, BytesMut};

use blockgraph_primitives::{B256, Codec, ContentAddress, OnceCache};

use crate::error::Result;
use crate::node::{Link, Node};
use crate::reader::ByteReader;

/// Serialized header size in bytes
pub const HEADER_SIZE: usize = 80;

/// A decoded block header.
///
/// Equality compares the six header fields.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockHeader {
    version: u32,
    parent: ContentAddress,
    merkle_root: ContentAddress,
    timestamp: u32,
    difficulty: u32,
    nonce: u32,
    #[cfg_attr(feature = "serde", serde(skip))]
    address_cache: OnceCache<ContentAddress>,
}

impl BlockHeader {
    /// Build a header from its fields.
    ///
    /// `parent` and `merkle_root` are raw digests in wire byte order.
    pub const fn new(
        version: u32,
        parent: B256,
        merkle_root: B256,
        timestamp: u32,
        difficulty: u32,
        nonce: u32,
    ) -> Self {
        Self {
            version,
            parent: ContentAddress::from_digest(Codec::BitcoinBlock, parent),
            merkle_root: ContentAddress::from_digest(Codec::BitcoinTx, merkle_root),
            timestamp,
            difficulty,
            nonce,
            address_cache: OnceCache::new(),
        }
    }

    /// Decode a header from the first 80 bytes of `bytes`. Anything after
    /// the header is ignored.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut reader = ByteReader::new(Bytes::copy_from_slice(bytes));
        Self::decode_from(&mut reader)
    }

    /// Decode a header at the reader's position, advancing it by exactly 80
    /// bytes on success.
    pub fn decode_from(reader: &mut ByteReader) -> Result<Self> {
        let version = reader.read_u32_le("version")?;
        let parent = B256::from(reader.read_array::<32>("prev_block")?);
        let merkle_root = B256::from(reader.read_array::<32>("merkle_root")?);
        let timestamp = reader.read_u32_le("timestamp")?;
        let difficulty = reader.read_u32_le("difficulty")?;
        let nonce = reader.read_u32_le("nonce")?;

        Ok(Self::new(
            version,
            parent,
            merkle_root,
            timestamp,
            difficulty,
            nonce,
        ))
    }

    /// Block version
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Address of the previous block's header
    pub const fn parent(&self) -> &ContentAddress {
        &self.parent
    }

    /// Address of the transaction merkle root
    pub const fn merkle_root(&self) -> &ContentAddress {
        &self.merkle_root
    }

    /// Block timestamp (seconds since the Unix epoch)
    pub const fn timestamp(&self) -> u32 {
        self.timestamp
    }

    /// Compact difficulty target ("bits")
    pub const fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Proof-of-work nonce
    pub const fn nonce(&self) -> u32 {
        self.nonce
    }

    /// The block hash: the double-SHA256 digest of the serialized header
    pub fn block_hash(&self) -> B256 {
        *self.address().digest()
    }

    /// Serialize the header into its 80-byte wire form
    pub fn to_array(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        LittleEndian::write_u32(&mut out[0..4], self.version);
        out[4..36].copy_from_slice(self.parent.as_bytes());
        out[36..68].copy_from_slice(self.merkle_root.as_bytes());
        LittleEndian::write_u32(&mut out[68..72], self.timestamp);
        LittleEndian::write_u32(&mut out[72..76], self.difficulty);
        LittleEndian::write_u32(&mut out[76..80], self.nonce);
        out
    }

    /// Serialize the header into its 80-byte wire form
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(HEADER_SIZE);
        buf.put_slice(&self.to_array());
        buf.freeze()
    }
}

impl Node for BlockHeader {
    const CODEC: Codec = Codec::BitcoinBlock;

    fn address(&self) -> ContentAddress {
        *self
            .address_cache
            .get_or_compute(|| ContentAddress::compute(Self::CODEC, &self.to_array()))
    }

    fn raw_data(&self) -> Bytes {
        self.to_bytes()
    }

    fn links(&self) -> Vec<Link> {
        vec![
            Link::new("parent", self.parent),
            Link::new("merkleRoot", self.merkle_root),
        ]
    }
}

impl PartialEq for BlockHeader {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.parent == other.parent
            && self.merkle_root == other.merkle_root
            && self.timestamp == other.timestamp
            && self.difficulty == other.difficulty
            && self.nonce == other.nonce
    }
}

impl Eq for BlockHeader {}

impl fmt::Display for BlockHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockHeader[{}]", self.address().to_reversed_hex())
    }
}

impl TryFrom<&[u8]> for BlockHeader {
    type Error = crate::error::DecodeError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::decode(bytes)
    }
}

#[cfg(any(test, feature = "arbitrary"))]
impl<'a> arbitrary::Arbitrary<'a> for BlockHeader {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        Ok(Self::new(
            u.arbitrary()?,
            B256::from(u.arbitrary::<[u8; 32]>()?),
            B256::from(u.arbitrary::<[u8; 32]>()?),
            u.arbitrary()?,
            u.arbitrary()?,
            u.arbitrary()?,
        ))
    }
}
