//! Merkle tree reconstruction
//!
//! Rebuilds every internal node of a block's transaction tree from the
//! ordered transaction addresses. A layer with an odd number of entries has
//! its last entry paired with itself, matching how the chain computes its
//! merkle roots.

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};
use rayon::prelude::*;
use tracing::trace;

use blockgraph_primitives::hash::DIGEST_PAIR_LENGTH;
use blockgraph_primitives::{B256, Codec, ContentAddress, Hasher};

use crate::error::{DecodeError, Result};
use crate::node::{Link, Node};

/// Layers with at least this many pairs are hashed on the rayon pool
const PARALLEL_PAIRS: usize = 512;

/// An internal pairing of the transaction tree.
///
/// Children are referenced by address only. The node's own address is the
/// double-SHA256 of `left.digest || right.digest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeNode {
    left: ContentAddress,
    right: ContentAddress,
    address: ContentAddress,
}

impl TreeNode {
    /// Pair two child addresses
    pub fn new(left: ContentAddress, right: ContentAddress) -> Self {
        let digest = Hasher::digest_pair(left.digest(), right.digest());
        Self {
            left,
            right,
            address: ContentAddress::from_digest(Self::CODEC, digest),
        }
    }

    /// Decode a node from its 64-byte serialization
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != DIGEST_PAIR_LENGTH {
            return Err(DecodeError::malformed(
                "tree_node",
                format!("expected {DIGEST_PAIR_LENGTH} bytes, got {}", bytes.len()),
            ));
        }
        let (left, right) = bytes.split_at(DIGEST_PAIR_LENGTH / 2);
        Ok(Self::new(
            ContentAddress::from_digest(Self::CODEC, B256::from_slice(left)),
            ContentAddress::from_digest(Self::CODEC, B256::from_slice(right)),
        ))
    }

    /// Address of the left child
    pub const fn left(&self) -> &ContentAddress {
        &self.left
    }

    /// Address of the right child
    pub const fn right(&self) -> &ContentAddress {
        &self.right
    }

    /// Check if both children are the same entry, as happens at the end of
    /// an odd layer
    pub fn is_duplicated(&self) -> bool {
        self.left == self.right
    }

    /// The 64-byte serialization: left digest then right digest
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(DIGEST_PAIR_LENGTH);
        buf.put_slice(self.left.as_bytes());
        buf.put_slice(self.right.as_bytes());
        buf.freeze()
    }
}

impl Node for TreeNode {
    const CODEC: Codec = Codec::BitcoinTx;

    fn address(&self) -> ContentAddress {
        self.address
    }

    fn raw_data(&self) -> Bytes {
        self.to_bytes()
    }

    fn links(&self) -> Vec<Link> {
        vec![Link::new("left", self.left), Link::new("right", self.right)]
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TreeNode[{}]", self.address.to_reversed_hex())
    }
}

/// Number of internal nodes a tree over `leaves` entries has
pub fn tree_node_count(leaves: usize) -> usize {
    let mut width = leaves;
    let mut count = 0;
    while width > 1 {
        width = width.div_ceil(2);
        count += width;
    }
    count
}

/// Build every internal node of the tree over `leaves`.
///
/// Nodes are returned layer by layer, left to right, so the last node is the
/// root. A single leaf is its own root and yields no nodes.
///
/// # Errors
///
/// Returns [`DecodeError::EmptyBlock`] if `leaves` is empty.
pub fn build_tree(leaves: &[ContentAddress]) -> Result<Vec<TreeNode>> {
    if leaves.is_empty() {
        return Err(DecodeError::EmptyBlock);
    }

    let mut nodes = Vec::with_capacity(tree_node_count(leaves.len()));
    let mut layer = leaves.to_vec();
    let mut depth = 0usize;

    while layer.len() > 1 {
        if layer.len() % 2 == 1 {
            let last = layer[layer.len() - 1];
            layer.push(last);
        }

        let pairs = layer.len() / 2;
        let next: Vec<TreeNode> = if pairs >= PARALLEL_PAIRS {
            layer
                .par_chunks_exact(2)
                .map(|pair| TreeNode::new(pair[0], pair[1]))
                .collect()
        } else {
            layer
                .chunks_exact(2)
                .map(|pair| TreeNode::new(pair[0], pair[1]))
                .collect()
        };

        trace!(depth, nodes = next.len(), "built merkle layer");

        layer = next.iter().map(|node| node.address()).collect();
        nodes.extend(next);
        depth += 1;
    }

    Ok(nodes)
}

/// The root address of the tree over `leaves`
///
/// # Errors
///
/// Returns [`DecodeError::EmptyBlock`] if `leaves` is empty.
pub fn merkle_root(leaves: &[ContentAddress]) -> Result<ContentAddress> {
    match leaves {
        [] => Err(DecodeError::EmptyBlock),
        [leaf] => Ok(*leaf),
        _ => build_tree(leaves)?
            .last()
            .map(|root| root.address())
            .ok_or(DecodeError::EmptyBlock),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::b256;

    fn leaf(n: u8) -> ContentAddress {
        ContentAddress::compute(Codec::BitcoinTx, &[n])
    }

    fn leaves(n: usize) -> Vec<ContentAddress> {
        (0..n).map(|i| leaf(i as u8)).collect()
    }

    #[test]
    fn test_empty() {
        assert!(matches!(build_tree(&[]), Err(DecodeError::EmptyBlock)));
        assert!(matches!(merkle_root(&[]), Err(DecodeError::EmptyBlock)));
    }

    #[test]
    fn test_single_leaf() {
        let leaves = leaves(1);
        assert!(build_tree(&leaves).unwrap().is_empty());
        assert_eq!(merkle_root(&leaves).unwrap(), leaves[0]);
    }

    #[test]
    fn test_two_leaves() {
        let leaves = leaves(2);
        let nodes = build_tree(&leaves).unwrap();

        assert_eq!(nodes.len(), 1);
        assert_eq!(*nodes[0].left(), leaves[0]);
        assert_eq!(*nodes[0].right(), leaves[1]);
        assert_eq!(
            *nodes[0].address().digest(),
            Hasher::digest_pair(leaves[0].digest(), leaves[1].digest())
        );
    }

    #[test]
    fn test_three_leaves_duplicates_last() {
        let leaves = leaves(3);
        let nodes = build_tree(&leaves).unwrap();

        // first layer: (0, 1) and (2, 2)
        assert_eq!(*nodes[0].left(), leaves[0]);
        assert_eq!(*nodes[0].right(), leaves[1]);
        assert_eq!(*nodes[1].left(), leaves[2]);
        assert_eq!(*nodes[1].right(), leaves[2]);
        assert!(nodes[1].is_duplicated());

        // the root pairs the two first-layer nodes
        assert_eq!(nodes.len(), 3);
        assert_eq!(*nodes[2].left(), nodes[0].address());
        assert_eq!(*nodes[2].right(), nodes[1].address());
        assert_eq!(merkle_root(&leaves).unwrap(), nodes[2].address());
    }

    #[test]
    fn test_four_leaves() {
        let leaves = leaves(4);
        let nodes = build_tree(&leaves).unwrap();

        assert_eq!(nodes.len(), 3);
        assert_eq!(*nodes[2].left(), nodes[0].address());
        assert_eq!(*nodes[2].right(), nodes[1].address());
        assert_eq!(merkle_root(&leaves).unwrap(), nodes[2].address());
    }

    #[test]
    fn test_node_count() {
        assert_eq!(tree_node_count(0), 0);
        assert_eq!(tree_node_count(1), 0);
        assert_eq!(tree_node_count(2), 1);
        assert_eq!(tree_node_count(3), 3);
        assert_eq!(tree_node_count(4), 3);
        assert_eq!(tree_node_count(5), 6);

        for n in 1..64 {
            assert_eq!(build_tree(&leaves(n)).unwrap().len(), tree_node_count(n));
        }
    }

    #[test]
    fn test_every_node_referenced_once_except_root() {
        let leaves = leaves(11);
        let nodes = build_tree(&leaves).unwrap();
        let (root, inner) = nodes.split_last().unwrap();

        for node in inner {
            let refs = nodes
                .iter()
                .filter(|parent| parent.left() == &node.address() || parent.right() == &node.address())
                .count();
            assert!(refs >= 1, "orphaned node {node}");
        }
        assert!(
            !nodes
                .iter()
                .any(|n| n.left() == &root.address() || n.right() == &root.address())
        );
    }

    #[test]
    fn test_parallel_layers_match_serial() {
        let leaves: Vec<_> = (0..(PARALLEL_PAIRS * 2 + 3) as u32)
            .map(|i| ContentAddress::compute(Codec::BitcoinTx, &i.to_le_bytes()))
            .collect();
        let nodes = build_tree(&leaves).unwrap();

        // recompute the first layer serially
        for (i, pair) in leaves.chunks(2).enumerate() {
            let right = pair.get(1).unwrap_or(&pair[0]);
            assert_eq!(nodes[i], TreeNode::new(pair[0], *right));
        }
        assert_eq!(nodes.len(), tree_node_count(leaves.len()));
    }

    #[test]
    fn test_mainnet_two_transaction_root() {
        // block 00000000b0c5a240b2a61d2e75692224efd4cbecdf6eaf4cc2cf477ca7c270e7
        let leaves = [
            ContentAddress::from_digest(
                Codec::BitcoinTx,
                b256!("21da2ae8cc773b020b4873f597369416cf961a1896c24106b0198459fec2df77"),
            ),
            ContentAddress::from_digest(
                Codec::BitcoinTx,
                b256!("339d9a371e2b5a26147ddfd87228b900ff75762a18a40f2778bedbcde7e9b0a3"),
            ),
        ];

        assert_eq!(
            *merkle_root(&leaves).unwrap().digest(),
            b256!("bf4473e53794beae34e64fccc471dace6ae544180816f89591894e0f417a914c")
        );
    }

    #[test]
    fn test_serialization() {
        let node = TreeNode::new(leaf(1), leaf(2));
        let bytes = node.raw_data();

        assert_eq!(bytes.len(), DIGEST_PAIR_LENGTH);
        assert_eq!(&bytes[..32], leaf(1).as_bytes());
        assert_eq!(&bytes[32..], leaf(2).as_bytes());
        assert_eq!(node.address(), ContentAddress::compute(Codec::BitcoinTx, &bytes));
        assert_eq!(TreeNode::decode(&bytes).unwrap(), node);
        assert!(TreeNode::decode(&bytes[..63]).is_err());

        let links = node.links();
        assert_eq!(links[0], Link::new("left", leaf(1)));
        assert_eq!(links[1], Link::new("right", leaf(2)));
    }
}
