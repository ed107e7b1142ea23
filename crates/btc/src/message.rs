//! Block message assembly
//!
//! [`BlockDecoder`] walks a full block message in one pass (header,
//! transaction count, transactions) and rebuilds the merkle tree over the
//! transaction addresses. The result is a [`BlockGraph`]: every node a
//! content-addressed store needs to serve the block piece by piece.
//!
//! ## Example Usage
//!
//! ```
//! use blockgraph_btc::{BlockHeader, OutPoint, Transaction, TxIn, TxOut, decode_block_message};
//! use blockgraph_btc::bytes::Bytes;
//!
//! let coinbase = Transaction::new(
//!     1,
//!     vec![TxIn { previous_output: OutPoint::NULL, script_sig: Bytes::from_static(&[0x51]), sequence: u32::MAX }],
//!     vec![TxOut { value: 50, script_pubkey: Bytes::from_static(&[0x51]) }],
//!     vec![],
//!     0,
//! )
//! .unwrap();
//!
//! let header = BlockHeader::new(1, Default::default(), coinbase.txid(), 0, 0x1d00ffff, 0);
//!
//! let mut message = header.to_bytes().to_vec();
//! message.push(1);
//! message.extend_from_slice(&coinbase.to_bytes());
//!
//! let nodes = decode_block_message(&message).unwrap();
//! assert_eq!(nodes.len(), 2);
//! assert_eq!(nodes[1].address(), *header.merkle_root());
//! ```

use bytes::Bytes;
use tracing::{debug, trace, warn};

use blockgraph_primitives::ContentAddress;

use crate::error::{DecodeError, Location, Phase, Result};
use crate::header::{BlockHeader, HEADER_SIZE};
use crate::limits::DecodeLimits;
use crate::merkle::{TreeNode, build_tree, merkle_root};
use crate::node::{BlockNode, Node};
use crate::reader::ByteReader;
use crate::transaction::{MIN_TRANSACTION_SIZE, Transaction};

/// Every node decoded from one block message.
///
/// Node order is `[header, tx0 .. txN-1, tree0 .. treeK-1]`, with tree nodes
/// layer by layer so the last one is the merkle root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockGraph {
    header: BlockHeader,
    transactions: Vec<Transaction>,
    tree: Vec<TreeNode>,
}

impl BlockGraph {
    /// The block header
    pub const fn header(&self) -> &BlockHeader {
        &self.header
    }

    /// The transactions, in block order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The internal merkle nodes, layer by layer
    pub fn tree_nodes(&self) -> &[TreeNode] {
        &self.tree
    }

    /// The merkle root rebuilt from the transactions.
    ///
    /// This is the last tree node, or the only transaction when the block
    /// has one.
    pub fn root(&self) -> ContentAddress {
        match self.tree.last() {
            Some(node) => node.address(),
            // decoding rejects blocks without transactions
            None => self.transactions[0].address(),
        }
    }

    /// Check that the header's merkle root matches the transactions
    pub fn verify_merkle_root(&self) -> Result<()> {
        let declared = *self.header.merkle_root();
        let computed = self.root();
        if declared != computed {
            return Err(DecodeError::MerkleRootMismatch { declared, computed });
        }
        Ok(())
    }

    /// Total number of nodes
    pub fn len(&self) -> usize {
        1 + self.transactions.len() + self.tree.len()
    }

    /// Always false: a graph holds at least its header
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Addresses of every node, in node order
    pub fn addresses(&self) -> Vec<ContentAddress> {
        let mut out = Vec::with_capacity(self.len());
        out.push(self.header.address());
        out.extend(self.transactions.iter().map(Node::address));
        out.extend(self.tree.iter().map(Node::address));
        out
    }

    /// Every node, in node order
    pub fn nodes(&self) -> Vec<BlockNode> {
        self.clone().into_nodes()
    }

    /// Consume the graph into its flat node list
    pub fn into_nodes(self) -> Vec<BlockNode> {
        let mut out = Vec::with_capacity(self.len());
        out.push(BlockNode::Header(self.header));
        out.extend(self.transactions.into_iter().map(BlockNode::Transaction));
        out.extend(self.tree.into_iter().map(BlockNode::TreeNode));
        out
    }
}

impl From<BlockGraph> for Vec<BlockNode> {
    fn from(graph: BlockGraph) -> Self {
        graph.into_nodes()
    }
}

/// Decodes block messages under a set of [`DecodeLimits`]
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockDecoder {
    limits: DecodeLimits,
}

impl BlockDecoder {
    /// Create a decoder with the given limits
    pub const fn new(limits: DecodeLimits) -> Self {
        Self { limits }
    }

    /// The limits this decoder enforces
    pub const fn limits(&self) -> &DecodeLimits {
        &self.limits
    }

    /// Decode a full block message.
    ///
    /// Failures are annotated with the phase, and for transactions the
    /// index, they happened at. See [`DecodeError::root_cause`].
    pub fn decode(&self, message: impl Into<Bytes>) -> Result<BlockGraph> {
        let message = message.into();
        debug!(size = message.len(), "decoding block message");

        if message.len() > self.limits.max_message_size() {
            return Err(DecodeError::limit_exceeded(
                "message size",
                self.limits.max_message_size() as u64,
                message.len() as u64,
            ));
        }

        let mut reader = ByteReader::new(message.clone());

        let header = BlockHeader::decode_from(&mut reader)
            .map_err(|e| e.at(Location::new(Phase::Header)))?;
        check_header(&header, &message[..HEADER_SIZE])
            .map_err(|e| e.at(Location::new(Phase::Header)))?;

        let count = self
            .read_tx_count(&mut reader)
            .map_err(|e| e.at(Location::new(Phase::TxCount)))?;
        if count == 0 {
            return Err(DecodeError::EmptyBlock);
        }

        let mut transactions = Vec::with_capacity(count as usize);
        for index in 0..count {
            let tx = Transaction::decode_from(&mut reader)
                .map_err(|e| e.at(Location::transaction(index, count)))?;
            trace!(index, txid = %tx.address().to_reversed_hex(), "read transaction");
            transactions.push(tx);
        }

        if !reader.is_empty() {
            return Err(DecodeError::TrailingBytes {
                remaining: reader.remaining(),
            }
            .at(Location::new(Phase::Trailer)));
        }

        let leaves: Vec<ContentAddress> = transactions.iter().map(Node::address).collect();
        let tree =
            build_tree(&leaves).map_err(|e| e.at(Location::new(Phase::MerkleTree)))?;

        let graph = BlockGraph {
            header,
            transactions,
            tree,
        };

        debug!(
            block = %graph.header.address().to_reversed_hex(),
            transactions = graph.transactions.len(),
            tree_nodes = graph.tree.len(),
            "decoded block message"
        );

        Ok(graph)
    }

    /// Decode a message and check its merkle root against the header
    pub fn decode_verified(&self, message: impl Into<Bytes>) -> Result<BlockGraph> {
        let graph = self.decode(message)?;
        graph.verify_merkle_root()?;
        Ok(graph)
    }

    fn read_tx_count(&self, reader: &mut ByteReader) -> Result<u64> {
        let count = reader.read_compact_size("tx_count")?;
        if count == 0 {
            return Ok(0);
        }

        if count > self.limits.max_transactions() {
            return Err(DecodeError::limit_exceeded(
                "transaction count",
                self.limits.max_transactions(),
                count,
            ));
        }

        let fits = (reader.remaining() / MIN_TRANSACTION_SIZE) as u64;
        if count > fits {
            return Err(DecodeError::malformed(
                "tx_count",
                format!(
                    "{count} transactions cannot fit in {} remaining bytes",
                    reader.remaining()
                ),
            ));
        }
        Ok(count)
    }
}

/// Compare the re-serialized header with the bytes it was read from
fn check_header(header: &BlockHeader, input: &[u8]) -> Result<()> {
    let encoded = header.to_array();
    if let Some(position) = encoded.iter().zip(input).position(|(a, b)| a != b) {
        warn!(position, "re-serialized header differs from input");
        return Err(DecodeError::IntegrityMismatch { position });
    }
    Ok(())
}

/// Decode a block message with the default limits into its flat node list:
/// `[header, tx0 .. txN-1, tree0 .. treeK-1]`.
pub fn decode_block_message(message: &[u8]) -> Result<Vec<BlockNode>> {
    BlockDecoder::default()
        .decode(Bytes::copy_from_slice(message))
        .map(BlockGraph::into_nodes)
}

/// Rebuild the merkle root over a list of transactions
pub fn transactions_root(transactions: &[Transaction]) -> Result<ContentAddress> {
    let leaves: Vec<ContentAddress> = transactions.iter().map(Node::address).collect();
    merkle_root(&leaves)
}
