//! Addressable nodes
//!
//! Every piece of a decoded block is a [`Node`]: it has a content address
//! computed from its own serialization and a list of named [`Link`]s to the
//! nodes it references. [`BlockNode`] holds any of the three node kinds so a
//! block graph can be handed to a store as one flat list.

use bytes::Bytes;

use blockgraph_primitives::{Codec, ContentAddress};

use crate::error::{DecodeError, Result};
use crate::header::BlockHeader;
use crate::merkle::TreeNode;
use crate::transaction::Transaction;

/// A named reference from one node to another
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    /// Path segment a resolver descends through, e.g. `parent` or `left`
    pub name: String,
    /// Address of the referenced node
    pub address: ContentAddress,
}

impl Link {
    /// Create a link
    pub fn new(name: impl Into<String>, address: ContentAddress) -> Self {
        Self {
            name: name.into(),
            address,
        }
    }
}

/// Core trait for the nodes of a block graph.
pub trait Node: Send + Sync + 'static {
    /// The multicodec tag of this node type
    const CODEC: Codec;

    /// The content address of this node
    fn address(&self) -> ContentAddress;

    /// The serialized bytes a store keeps for this node.
    ///
    /// Hashing them under [`Node::CODEC`] gives [`Node::address`]. For
    /// segwit transactions these are the witness-stripped bytes.
    fn raw_data(&self) -> Bytes;

    /// Outgoing references, in a stable order
    fn links(&self) -> Vec<Link>;

    /// Verify that this node matches an expected address
    fn verify(&self, expected: &ContentAddress) -> Result<()> {
        let actual = self.address();
        if actual != *expected {
            return Err(DecodeError::VerificationFailed {
                expected: *expected,
                actual,
            });
        }
        Ok(())
    }
}

/// Any node of a block graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockNode {
    /// The block header
    Header(BlockHeader),
    /// A transaction (a merkle leaf)
    Transaction(Transaction),
    /// An internal merkle pairing
    TreeNode(TreeNode),
}

impl BlockNode {
    /// Get the address of this node
    pub fn address(&self) -> ContentAddress {
        match self {
            Self::Header(n) => n.address(),
            Self::Transaction(n) => n.address(),
            Self::TreeNode(n) => n.address(),
        }
    }

    /// Get the codec of this node
    pub const fn codec(&self) -> Codec {
        match self {
            Self::Header(_) => BlockHeader::CODEC,
            Self::Transaction(_) => Transaction::CODEC,
            Self::TreeNode(_) => TreeNode::CODEC,
        }
    }

    /// Get the bytes a store keeps for this node
    pub fn raw_data(&self) -> Bytes {
        match self {
            Self::Header(n) => n.raw_data(),
            Self::Transaction(n) => n.raw_data(),
            Self::TreeNode(n) => n.raw_data(),
        }
    }

    /// Get the outgoing references of this node
    pub fn links(&self) -> Vec<Link> {
        match self {
            Self::Header(n) => n.links(),
            Self::Transaction(n) => n.links(),
            Self::TreeNode(n) => n.links(),
        }
    }

    /// Check if this is the header
    pub const fn is_header(&self) -> bool {
        matches!(self, Self::Header(_))
    }

    /// Check if this is a transaction
    pub const fn is_transaction(&self) -> bool {
        matches!(self, Self::Transaction(_))
    }

    /// Check if this is a merkle tree node
    pub const fn is_tree_node(&self) -> bool {
        matches!(self, Self::TreeNode(_))
    }

    /// Get the header, if this is one
    pub const fn as_header(&self) -> Option<&BlockHeader> {
        match self {
            Self::Header(n) => Some(n),
            _ => None,
        }
    }

    /// Get the transaction, if this is one
    pub const fn as_transaction(&self) -> Option<&Transaction> {
        match self {
            Self::Transaction(n) => Some(n),
            _ => None,
        }
    }

    /// Get the tree node, if this is one
    pub const fn as_tree_node(&self) -> Option<&TreeNode> {
        match self {
            Self::TreeNode(n) => Some(n),
            _ => None,
        }
    }
}

impl From<BlockHeader> for BlockNode {
    fn from(node: BlockHeader) -> Self {
        Self::Header(node)
    }
}

impl From<Transaction> for BlockNode {
    fn from(node: Transaction) -> Self {
        Self::Transaction(node)
    }
}

impl From<TreeNode> for BlockNode {
    fn from(node: TreeNode) -> Self {
        Self::TreeNode(node)
    }
}
