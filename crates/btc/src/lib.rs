//! Bitcoin block messages as content-addressed node graphs
//!
//! This crate decodes one wire-format block message into the immutable nodes
//! a content-addressed store serves independently: the header, every
//! transaction, and every internal node of the transaction merkle tree.
//!
//! ## Key Components
//!
//! - **Readers**: a position-tracked cursor over the message ([`ByteReader`])
//!   with compact-size integer support ([`compact_size`])
//! - **Decoders**: the 80-byte header ([`BlockHeader`]) and transactions
//!   with or without witness data ([`Transaction`])
//! - **Merkle tree**: internal pairing nodes rebuilt from the transaction
//!   addresses ([`TreeNode`], [`build_tree`])
//! - **Assembly**: the one-pass block decoder ([`BlockDecoder`]) producing a
//!   [`BlockGraph`]
//!
//! ## Usage Examples
//!
//! ```
//! use blockgraph_btc::{BlockDecoder, DecodeLimits, Phase};
//!
//! let decoder = BlockDecoder::new(DecodeLimits::default());
//!
//! // a header followed by a transaction count of zero
//! let mut message = vec![0u8; 80];
//! message.push(0);
//! assert!(matches!(
//!     decoder.decode(message),
//!     Err(blockgraph_btc::DecodeError::EmptyBlock)
//! ));
//!
//! // a message cut inside the header
//! let err = decoder.decode(vec![0u8; 79]).unwrap_err();
//! assert_eq!(err.phase(), Some(Phase::Header));
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-export dependencies that are part of our public API
pub use blockgraph_primitives::{self as primitives, B256, Codec, ContentAddress};
pub use bytes;

pub mod compact_size;
pub mod error;
pub mod header;
pub mod limits;
pub mod merkle;
pub mod message;
pub mod node;
pub mod reader;
pub mod transaction;

// Re-export core types
pub use error::{DecodeError, Location, Phase, Result};
pub use header::{BlockHeader, HEADER_SIZE};
pub use limits::{DEFAULT_MAX_MESSAGE_SIZE, DEFAULT_MAX_TRANSACTIONS, DecodeLimits};
pub use merkle::{TreeNode, build_tree, merkle_root, tree_node_count};
pub use message::{BlockDecoder, BlockGraph, decode_block_message, transactions_root};
pub use node::{BlockNode, Link, Node};
pub use reader::ByteReader;
pub use transaction::{
    COINBASE_INDEX, MIN_TRANSACTION_SIZE, OutPoint, Transaction, TxIn, TxOut, Witness,
};
