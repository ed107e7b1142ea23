//! Transaction decoding
//!
//! Transactions use the standard wire encoding, with or without the segwit
//! extension:
//!
//! ```text
//! version (4) | [marker 0x00 | flag 0x01] | inputs | outputs | [witnesses] | lock_time (4)
//! ```
//!
//! A decoded [`Transaction`] keeps the exact span it was read from. Its
//! content address is the txid: the double-SHA256 of the witness-free
//! encoding, which for a legacy transaction is that span itself.

use std::fmt;

use alloy_primitives::B256;
use bytes::{BufMut, Bytes, BytesMut};
use tracing::trace;

use blockgraph_primitives::{Codec, ContentAddress, OnceCache};

use crate::compact_size;
use crate::error::{DecodeError, Result};
use crate::node::{Link, Node};
use crate::reader::ByteReader;

/// Smallest possible transaction: one input with an empty script, one output
/// with an empty script, no witness.
pub const MIN_TRANSACTION_SIZE: usize = 4 + 1 + MIN_INPUT_SIZE + 1 + MIN_OUTPUT_SIZE + 4;

/// Outpoint (36) + empty script length (1) + sequence (4)
const MIN_INPUT_SIZE: usize = 41;

/// Value (8) + empty script length (1)
const MIN_OUTPUT_SIZE: usize = 9;

/// An empty witness stack is a single zero count byte
const MIN_WITNESS_SIZE: usize = 1;

const SEGWIT_MARKER: u8 = 0x00;
const SEGWIT_FLAG: u8 = 0x01;

/// Output index used by coinbase inputs
pub const COINBASE_INDEX: u32 = u32::MAX;

/// Reference to an output of a previous transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutPoint {
    /// Previous transaction id, in wire byte order
    pub txid: B256,
    /// Output index within that transaction
    pub index: u32,
}

impl OutPoint {
    /// The null outpoint spent by coinbase inputs
    pub const NULL: Self = Self {
        txid: B256::ZERO,
        index: COINBASE_INDEX,
    };

    /// Check if this is the coinbase outpoint
    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }
}

/// A transaction input
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TxIn {
    /// The output being spent
    pub previous_output: OutPoint,
    /// Unlocking script
    pub script_sig: Bytes,
    /// Sequence number
    pub sequence: u32,
}

impl TxIn {
    /// Address of the transaction this input spends from, or `None` for a
    /// coinbase input.
    pub fn previous(&self) -> Option<ContentAddress> {
        if self.is_coinbase() {
            return None;
        }
        Some(ContentAddress::from_digest(
            Codec::BitcoinTx,
            self.previous_output.txid,
        ))
    }

    /// Check if this input spends the null outpoint
    pub fn is_coinbase(&self) -> bool {
        self.previous_output.is_null()
    }

    fn decode_from(reader: &mut ByteReader) -> Result<Self> {
        let txid = B256::from(reader.read_array::<32>("prev_txid")?);
        let index = reader.read_u32_le("prev_index")?;
        let script_sig = reader.read_var_bytes("script_sig")?;
        let sequence = reader.read_u32_le("sequence")?;

        Ok(Self {
            previous_output: OutPoint { txid, index },
            script_sig,
            sequence,
        })
    }

    fn encode(&self, buf: &mut BytesMut) {
        buf.put_slice(self.previous_output.txid.as_slice());
        buf.put_u32_le(self.previous_output.index);
        compact_size::put(buf, self.script_sig.len() as u64);
        buf.put_slice(&self.script_sig);
        buf.put_u32_le(self.sequence);
    }

    fn encoded_len(&self) -> usize {
        36 + var_bytes_len(&self.script_sig) + 4
    }
}

/// A transaction output
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TxOut {
    /// Value in satoshis
    pub value: u64,
    /// Locking script
    pub script_pubkey: Bytes,
}

impl TxOut {
    fn decode_from(reader: &mut ByteReader) -> Result<Self> {
        let value = reader.read_u64_le("value")?;
        let script_pubkey = reader.read_var_bytes("script_pubkey")?;
        Ok(Self {
            value,
            script_pubkey,
        })
    }

    fn encode(&self, buf: &mut BytesMut) {
        buf.put_u64_le(self.value);
        compact_size::put(buf, self.script_pubkey.len() as u64);
        buf.put_slice(&self.script_pubkey);
    }

    fn encoded_len(&self) -> usize {
        8 + var_bytes_len(&self.script_pubkey)
    }
}

/// The witness stack of one input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Witness {
    items: Vec<Bytes>,
}

impl Witness {
    /// Create a witness from its stack items
    pub fn new(items: Vec<Bytes>) -> Self {
        Self { items }
    }

    /// The stack items, bottom first
    pub fn items(&self) -> &[Bytes] {
        &self.items
    }

    /// Check if the stack has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn decode_from(reader: &mut ByteReader) -> Result<Self> {
        let count = reader.read_count("witness_item_count", 1)?;
        let mut items = Vec::with_capacity(count as usize);
        for _ in 0..count {
            items.push(reader.read_var_bytes("witness_item")?);
        }
        Ok(Self { items })
    }

    fn encode(&self, buf: &mut BytesMut) {
        compact_size::put(buf, self.items.len() as u64);
        for item in &self.items {
            compact_size::put(buf, item.len() as u64);
            buf.put_slice(item);
        }
    }

    fn encoded_len(&self) -> usize {
        compact_size::encoded_len(self.items.len() as u64)
            + self.items.iter().map(var_bytes_len).sum::<usize>()
    }
}

/// A decoded transaction.
///
/// Equality compares the decoded fields.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transaction {
    version: u32,
    inputs: Vec<TxIn>,
    outputs: Vec<TxOut>,
    /// One stack per input when the segwit encoding is used, empty otherwise
    witnesses: Vec<Witness>,
    lock_time: u32,
    raw: Bytes,
    #[cfg_attr(feature = "serde", serde(skip))]
    address_cache: OnceCache<ContentAddress>,
}

impl Transaction {
    /// Build a transaction from its parts. Pass an empty `witnesses` list for
    /// the legacy encoding, otherwise one stack per input.
    pub fn new(
        version: u32,
        inputs: Vec<TxIn>,
        outputs: Vec<TxOut>,
        witnesses: Vec<Witness>,
        lock_time: u32,
    ) -> Result<Self> {
        if !witnesses.is_empty() {
            if witnesses.len() != inputs.len() {
                return Err(DecodeError::malformed(
                    "witness",
                    format!(
                        "{} witness stacks for {} inputs",
                        witnesses.len(),
                        inputs.len()
                    ),
                ));
            }
            if witnesses.iter().all(Witness::is_empty) {
                return Err(DecodeError::malformed("witness", "all witness stacks empty"));
            }
        }

        let mut tx = Self {
            version,
            inputs,
            outputs,
            witnesses,
            lock_time,
            raw: Bytes::new(),
            address_cache: OnceCache::new(),
        };
        tx.raw = tx.encode(tx.has_witness());
        Ok(tx)
    }

    /// Decode a single transaction that fills `bytes` entirely
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let mut reader = ByteReader::new(Bytes::copy_from_slice(bytes));
        let tx = Self::decode_from(&mut reader)?;
        if !reader.is_empty() {
            return Err(DecodeError::TrailingBytes {
                remaining: reader.remaining(),
            });
        }
        Ok(tx)
    }

    /// Decode one transaction at the reader's position, advancing it past
    /// exactly that transaction.
    pub fn decode_from(reader: &mut ByteReader) -> Result<Self> {
        let start = reader.position();
        let version = reader.read_u32_le("version")?;

        // A zero input count is impossible, so a zero byte here is the marker
        let segwit = reader.peek_u8() == Some(SEGWIT_MARKER);
        if segwit {
            reader.read_u8("marker")?;
            let flag = reader.read_u8("flag")?;
            if flag != SEGWIT_FLAG {
                return Err(DecodeError::malformed(
                    "flag",
                    format!("unsupported segwit flag {flag:#04x}"),
                ));
            }
        }

        let input_count = reader.read_count("input_count", MIN_INPUT_SIZE)?;
        let mut inputs = Vec::with_capacity(input_count as usize);
        for _ in 0..input_count {
            inputs.push(TxIn::decode_from(reader)?);
        }

        let output_count = reader.read_count("output_count", MIN_OUTPUT_SIZE)?;
        let mut outputs = Vec::with_capacity(output_count as usize);
        for _ in 0..output_count {
            outputs.push(TxOut::decode_from(reader)?);
        }

        let mut witnesses = Vec::new();
        if segwit {
            if inputs.len() > reader.remaining() / MIN_WITNESS_SIZE {
                return Err(DecodeError::malformed(
                    "witness",
                    format!(
                        "{} witness stacks cannot fit in {} remaining bytes",
                        inputs.len(),
                        reader.remaining()
                    ),
                ));
            }
            witnesses.reserve(inputs.len());
            for _ in 0..inputs.len() {
                witnesses.push(Witness::decode_from(reader)?);
            }
            if witnesses.iter().all(Witness::is_empty) {
                return Err(DecodeError::malformed(
                    "witness",
                    "segwit flag set but all witness stacks are empty",
                ));
            }
        }

        let lock_time = reader.read_u32_le("lock_time")?;
        let raw = reader.slice_from(start);

        trace!(
            inputs = inputs.len(),
            outputs = outputs.len(),
            segwit,
            size = raw.len(),
            "decoded transaction"
        );

        Ok(Self {
            version,
            inputs,
            outputs,
            witnesses,
            lock_time,
            raw,
            address_cache: OnceCache::new(),
        })
    }

    /// Transaction version
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Inputs, in wire order
    pub fn inputs(&self) -> &[TxIn] {
        &self.inputs
    }

    /// Outputs, in wire order
    pub fn outputs(&self) -> &[TxOut] {
        &self.outputs
    }

    /// Witness stacks, one per input, or empty for a legacy transaction
    pub fn witnesses(&self) -> &[Witness] {
        &self.witnesses
    }

    /// Lock time
    pub const fn lock_time(&self) -> u32 {
        self.lock_time
    }

    /// Check if the transaction was encoded with witness data
    pub fn has_witness(&self) -> bool {
        !self.witnesses.is_empty()
    }

    /// Check if this is a coinbase transaction
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].is_coinbase()
    }

    /// The transaction id: double-SHA256 of the witness-free encoding
    pub fn txid(&self) -> B256 {
        *self.address().digest()
    }

    /// The witness transaction id: double-SHA256 of the full encoding
    pub fn wtxid(&self) -> B256 {
        if !self.has_witness() {
            return self.txid();
        }
        *ContentAddress::compute(Codec::BitcoinTx, &self.raw).digest()
    }

    /// Serialized size including witness data
    pub fn size(&self) -> usize {
        self.raw.len()
    }

    /// The exact bytes this transaction was decoded from
    pub fn to_bytes(&self) -> Bytes {
        self.raw.clone()
    }

    /// The encoding without marker, flag and witness stacks
    pub fn to_legacy_bytes(&self) -> Bytes {
        if self.has_witness() {
            self.encode(false)
        } else {
            self.raw.clone()
        }
    }

    fn encode(&self, with_witness: bool) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len(with_witness));
        buf.put_u32_le(self.version);
        if with_witness {
            buf.put_u8(SEGWIT_MARKER);
            buf.put_u8(SEGWIT_FLAG);
        }
        compact_size::put(&mut buf, self.inputs.len() as u64);
        for input in &self.inputs {
            input.encode(&mut buf);
        }
        compact_size::put(&mut buf, self.outputs.len() as u64);
        for output in &self.outputs {
            output.encode(&mut buf);
        }
        if with_witness {
            for witness in &self.witnesses {
                witness.encode(&mut buf);
            }
        }
        buf.put_u32_le(self.lock_time);
        buf.freeze()
    }

    fn encoded_len(&self, with_witness: bool) -> usize {
        let mut len = 4
            + compact_size::encoded_len(self.inputs.len() as u64)
            + self.inputs.iter().map(TxIn::encoded_len).sum::<usize>()
            + compact_size::encoded_len(self.outputs.len() as u64)
            + self.outputs.iter().map(TxOut::encoded_len).sum::<usize>()
            + 4;
        if with_witness {
            len += 2 + self.witnesses.iter().map(Witness::encoded_len).sum::<usize>();
        }
        len
    }
}

impl Node for Transaction {
    const CODEC: Codec = Codec::BitcoinTx;

    fn address(&self) -> ContentAddress {
        *self
            .address_cache
            .get_or_compute(|| ContentAddress::compute(Self::CODEC, &self.to_legacy_bytes()))
    }

    fn raw_data(&self) -> Bytes {
        self.to_legacy_bytes()
    }

    fn links(&self) -> Vec<Link> {
        self.inputs
            .iter()
            .enumerate()
            .filter_map(|(i, input)| {
                input
                    .previous()
                    .map(|address| Link::new(format!("inputs/{i}/prev"), address))
            })
            .collect()
    }
}

impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.inputs == other.inputs
            && self.outputs == other.outputs
            && self.witnesses == other.witnesses
            && self.lock_time == other.lock_time
    }
}

impl Eq for Transaction {}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transaction[{}]", self.address().to_reversed_hex())
    }
}

impl TryFrom<&[u8]> for Transaction {
    type Error = DecodeError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::decode(bytes)
    }
}

fn var_bytes_len(bytes: &Bytes) -> usize {
    compact_size::encoded_len(bytes.len() as u64) + bytes.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{b256, hex};

    /// Block 170 transaction 1: the first bitcoin transfer
    const BLOCK_170_TX: &str = "0100000001c997a5e56e104102fa209c6a852dd90660a20b2d9c352423edce25857fcd3704000000004847304402204e45e16932b8af514961a1d3a1a25fdf3f4f7732e9d624c6c61548ab5fb8cd410220181522ec8eca07de4860a4acdd12909d831cc56cbbac4622082221a8768d1d0901ffffffff0200ca9a3b00000000434104ae1a62fe09c5f51b13905f07f06b99a2f7159b2225f374cd378d71302fa28414e7aab37397f554a7df5f142c21c1b7303b8a0626f1baded5c72a704f7e6cd84cac00286bee0000000043410411db93e1dcdb8a016b49840f8c53bc1eb68a382e97b1482ecad7b148a6909a5cb2e0eaddfb84ccf9744464f82e160bfa9b8b64f9d4c03f999b8643f656b412a3ac00000000";

    /// BIP 143 native P2WPKH example, signed
    const SEGWIT_TX: &str = "01000000000102fff7f7881a8099afa6940d42d1e7f6362bec38171ea3edf433541db4e4ad969f00000000494830450221008b9d1dc26ba6a9cb62127b02742fa9d754cd3bebf337f7a55d114c8e5cdd30be022040529b194ba3f9281a99f2b1c0a19c0489bc22ede944ccf4ecbab4cc618ef3ed01eeffffffef51e1b804cc89d182d279655c3aa89e815b1b309fe287d9b2b55d57b90ec68a0100000000ffffffff02202cb206000000001976a9148280b37df378db99f66f85c95a783a76ac7a6d5988ac9093510d000000001976a9143bde42dbee7e4dbe6a21b2d50ce2f0167faa815988ac000247304402203609e17b84f6a7d30c80bfa610b5b4542f32a8a0d5447a12fb1366d7f01cc44a0220573a954c4518331561406f90300e8f3358f51928d43c212a8caed02de67eebee0121025476c2e83188368da1ff3e292e7acafcdb3566bb0ad253f62fc70f07aeee635711000000";

    fn coinbase_input() -> TxIn {
        TxIn {
            previous_output: OutPoint::NULL,
            script_sig: Bytes::from_static(&[0x04, 0xff, 0xff, 0x00, 0x1d]),
            sequence: u32::MAX,
        }
    }

    fn output(value: u64) -> TxOut {
        TxOut {
            value,
            script_pubkey: Bytes::from_static(&[0x51]),
        }
    }

    #[test]
    fn test_min_size() {
        assert_eq!(MIN_TRANSACTION_SIZE, 60);

        let input = TxIn {
            previous_output: OutPoint::NULL,
            script_sig: Bytes::new(),
            sequence: 0,
        };
        let output = TxOut {
            value: 0,
            script_pubkey: Bytes::new(),
        };
        let tx = Transaction::new(1, vec![input], vec![output], vec![], 0).unwrap();
        assert_eq!(tx.size(), MIN_TRANSACTION_SIZE);
    }

    #[test]
    fn test_decode_legacy() {
        let bytes = hex::decode(BLOCK_170_TX).unwrap();
        let tx = Transaction::decode(&bytes).unwrap();

        assert_eq!(tx.version(), 1);
        assert_eq!(tx.inputs().len(), 1);
        assert_eq!(tx.outputs().len(), 2);
        assert_eq!(tx.outputs()[0].value, 1_000_000_000);
        assert_eq!(tx.outputs()[1].value, 4_000_000_000);
        assert_eq!(tx.lock_time(), 0);
        assert!(!tx.has_witness());
        assert!(!tx.is_coinbase());

        assert_eq!(tx.to_bytes().as_ref(), bytes.as_slice());
        assert_eq!(tx.to_legacy_bytes(), tx.to_bytes());
        assert_eq!(
            tx.address().to_reversed_hex(),
            "f4184fc596403b9d638783cf57adfe4c75c605f6356fbc91338530e9831e9e16"
        );
        assert_eq!(tx.txid(), tx.wtxid());
    }

    #[test]
    fn test_links_to_spent_transaction() {
        let bytes = hex::decode(BLOCK_170_TX).unwrap();
        let tx = Transaction::decode(&bytes).unwrap();
        let links = tx.links();

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].name, "inputs/0/prev");
        assert_eq!(links[0].address.codec(), Codec::BitcoinTx);
        // spends the coinbase of block 9
        assert_eq!(
            links[0].address.to_reversed_hex(),
            "0437cd7f8525ceed2324359c2d0ba26006d92d856a9c20fa0241106ee5a597c9"
        );
    }

    #[test]
    fn test_coinbase_has_no_previous() {
        let tx =
            Transaction::new(1, vec![coinbase_input()], vec![output(50)], vec![], 0).unwrap();

        assert!(tx.is_coinbase());
        assert_eq!(tx.inputs()[0].previous(), None);
        assert!(tx.links().is_empty());
    }

    #[test]
    fn test_decode_segwit() {
        let bytes = hex::decode(SEGWIT_TX).unwrap();
        let tx = Transaction::decode(&bytes).unwrap();

        assert!(tx.has_witness());
        assert_eq!(tx.inputs().len(), 2);
        assert_eq!(tx.witnesses().len(), 2);
        assert!(tx.witnesses()[0].is_empty());
        assert_eq!(tx.witnesses()[1].items().len(), 2);
        assert_eq!(tx.lock_time(), 0x11);

        // the full encoding keeps the witness, the node's raw data does not
        assert_eq!(tx.to_bytes().as_ref(), bytes.as_slice());
        let legacy = tx.to_legacy_bytes();
        assert_eq!(tx.raw_data(), legacy);
        assert_eq!(legacy.len(), 233);
        assert_eq!(bytes.len(), 343);
        assert_eq!(
            tx.address(),
            ContentAddress::compute(Codec::BitcoinTx, &legacy)
        );
        assert_ne!(tx.txid(), tx.wtxid());
        assert_eq!(
            tx.address().to_reversed_hex(),
            "e8151a2af31c368a35053ddd4bdb285a8595c769a3ad83e0fa02314a602d4609"
        );

        // the legacy encoding decodes to the same transaction minus witnesses
        let stripped = Transaction::decode(&legacy).unwrap();
        assert!(!stripped.has_witness());
        assert_eq!(stripped.address(), tx.address());
    }

    #[test]
    fn test_reencode_matches_decoded() {
        let bytes = hex::decode(SEGWIT_TX).unwrap();
        let tx = Transaction::decode(&bytes).unwrap();

        let rebuilt = Transaction::new(
            tx.version(),
            tx.inputs().to_vec(),
            tx.outputs().to_vec(),
            tx.witnesses().to_vec(),
            tx.lock_time(),
        )
        .unwrap();
        assert_eq!(rebuilt, tx);
        assert_eq!(rebuilt.to_bytes(), tx.to_bytes());
    }

    #[test]
    fn test_bad_segwit_flag() {
        let mut bytes = hex::decode(SEGWIT_TX).unwrap();
        bytes[5] = 0x02;

        let err = Transaction::decode(&bytes).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedField { field: "flag", .. }));
    }

    #[test]
    fn test_superfluous_witness_rejected() {
        let tx = Transaction::new(1, vec![coinbase_input()], vec![output(1)], vec![], 0).unwrap();
        let legacy = tx.to_bytes();

        // splice in marker, flag and one empty witness stack
        let mut bytes = legacy[..4].to_vec();
        bytes.extend_from_slice(&[SEGWIT_MARKER, SEGWIT_FLAG]);
        bytes.extend_from_slice(&legacy[4..legacy.len() - 4]);
        bytes.push(0x00);
        bytes.extend_from_slice(&legacy[legacy.len() - 4..]);

        let err = Transaction::decode(&bytes).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedField { field: "witness", .. }));

        assert!(
            Transaction::new(
                1,
                vec![coinbase_input()],
                vec![output(1)],
                vec![Witness::default()],
                0
            )
            .is_err()
        );
    }

    #[test]
    fn test_script_length_past_end() {
        let tx = Transaction::new(1, vec![coinbase_input()], vec![output(1)], vec![], 0).unwrap();
        let mut bytes = tx.to_bytes().to_vec();

        // script_sig length byte sits after version, input count and outpoint
        bytes[4 + 1 + 36] = 0xfc;

        let err = Transaction::decode(&bytes).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MalformedField {
                field: "script_sig",
                ..
            }
        ));
    }

    #[test]
    fn test_input_count_past_end() {
        let tx = Transaction::new(1, vec![coinbase_input()], vec![output(1)], vec![], 0).unwrap();
        let mut bytes = tx.to_bytes().to_vec();
        bytes[4] = 0x05;

        let err = Transaction::decode(&bytes).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MalformedField {
                field: "input_count",
                ..
            }
        ));
    }

    #[test]
    fn test_truncated_transaction() {
        let bytes = hex::decode(BLOCK_170_TX).unwrap();

        for len in [0, 3, 4, 50, bytes.len() - 1] {
            let err = Transaction::decode(&bytes[..len]).unwrap_err();
            assert!(
                matches!(
                    err,
                    DecodeError::TruncatedStream { .. } | DecodeError::MalformedField { .. }
                ),
                "unexpected error at {len}: {err:?}"
            );
        }

        // cutting the lock time is always a plain truncation
        let err = Transaction::decode(&bytes[..bytes.len() - 1]).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TruncatedStream {
                field: "lock_time",
                ..
            }
        ));
    }

    #[test]
    fn test_decode_from_stops_at_transaction_end() {
        let bytes = hex::decode(BLOCK_170_TX).unwrap();
        let mut buf = bytes.clone();
        buf.extend_from_slice(&bytes);

        let mut reader = ByteReader::new(buf);
        let first = Transaction::decode_from(&mut reader).unwrap();
        assert_eq!(reader.position(), bytes.len());
        let second = Transaction::decode_from(&mut reader).unwrap();
        assert!(reader.is_empty());
        assert_eq!(first.address(), second.address());
    }

    #[test]
    fn test_trailing_bytes() {
        let mut bytes = hex::decode(BLOCK_170_TX).unwrap();
        bytes.push(0);
        assert!(matches!(
            Transaction::decode(&bytes),
            Err(DecodeError::TrailingBytes { remaining: 1 })
        ));
    }

    #[test]
    fn test_outpoint_null() {
        assert!(OutPoint::NULL.is_null());
        let outpoint = OutPoint {
            txid: b256!("0000000000000000000000000000000000000000000000000000000000000001"),
            index: COINBASE_INDEX,
        };
        assert!(!outpoint.is_null());
    }
}
