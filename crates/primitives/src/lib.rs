//! Core primitives for content-addressed block graphs
//!
//! This crate provides the addressing layer used to turn chain data into a
//! graph of immutable, hash-identified nodes.
//!
//! ## Key Components
//!
//! - **Content addresses**: self-describing CIDs ([`ContentAddress`]) combining a
//!   [`Codec`] tag with a [`Multihash`]
//! - **Double-SHA256**: the chain's two-round digest ([`hash::Hasher`])
//! - **Caches**: write-once cells for lazily computed addresses ([`OnceCache`])
//!
//! ## Usage Examples
//!
//! ```
//! use blockgraph_primitives::{Codec, ContentAddress, Hasher};
//!
//! let address = ContentAddress::compute(Codec::BitcoinTx, b"hello");
//! assert_eq!(*address.digest(), Hasher::digest(b"hello"));
//! assert_eq!(address.codec(), Codec::BitcoinTx);
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-export dependencies that are part of our public API
pub use alloy_primitives::B256;
pub use bytes;

pub mod address;
mod cache;
pub mod codec;
pub mod error;
pub mod hash;

// Re-export core types
pub use address::{CID_VERSION, ContentAddress, Multihash};
pub use cache::OnceCache;
pub use codec::Codec;
pub use error::{PrimitivesError, Result};
pub use hash::{DIGEST_SIZE, HashFunction, Hasher};
