//! Error types for block message decoding
//!
//! The decoders report the low-level failure ([`DecodeError::TruncatedStream`],
//! [`DecodeError::MalformedField`], ...) and the block assembler wraps it once
//! in [`DecodeError::Context`], naming the decode phase and, for transactions,
//! the index that failed. [`DecodeError::root_cause`] strips that annotation.
//!
//! ## Example Usage
//!
//! ```
//! use blockgraph_btc::{DecodeError, Phase, decode_block_message};
//!
//! let err = decode_block_message(&[0u8; 40]).unwrap_err();
//! assert_eq!(err.phase(), Some(Phase::Header));
//! assert!(matches!(err.root_cause(), DecodeError::TruncatedStream { .. }));
//! ```

use std::fmt;

use blockgraph_primitives::ContentAddress;
use thiserror::Error;

/// Result type for decoding operations
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Decode phase of a block message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(strum::Display, strum::IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    /// The 80-byte block header
    Header,
    /// The compact-size transaction count
    TxCount,
    /// One of the transactions
    Transaction,
    /// Bytes past the last declared transaction
    Trailer,
    /// Merkle tree reconstruction
    MerkleTree,
}

/// Where in a block message a failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    /// The decode phase
    pub phase: Phase,
    /// Zero-based transaction index and declared transaction count
    pub tx: Option<(u64, u64)>,
}

impl Location {
    /// A location without a transaction index
    pub const fn new(phase: Phase) -> Self {
        Self { phase, tx: None }
    }

    /// The location of transaction `index` out of `count`
    pub const fn transaction(index: u64, count: u64) -> Self {
        Self {
            phase: Phase::Transaction,
            tx: Some((index, count)),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tx {
            Some((index, count)) => write!(f, "tx({index}/{count})"),
            None => write!(f, "{}", self.phase),
        }
    }
}

/// Errors raised while decoding a block message
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Fewer bytes remain than a field requires
    #[error(
        "truncated stream reading {field}: needed {needed} bytes, {remaining} remaining at offset {position}"
    )]
    TruncatedStream {
        /// The field being read
        field: &'static str,
        /// Bytes the field requires
        needed: usize,
        /// Bytes left in the stream
        remaining: usize,
        /// Cursor position when the read was attempted
        position: usize,
    },

    /// A declared length, count or flag is inconsistent with the message
    #[error("malformed {field}: {reason}")]
    MalformedField {
        /// The field that failed validation
        field: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// The block declares zero transactions
    #[error("block declares no transactions")]
    EmptyBlock,

    /// The re-serialized header differs from the bytes it was decoded from
    #[error("re-serialized header differs from input at byte {position}")]
    IntegrityMismatch {
        /// Offset of the first differing byte
        position: usize,
    },

    /// The header's merkle root does not match the one rebuilt from the transactions
    #[error("merkle root mismatch: header declares {declared}, transactions give {computed}")]
    MerkleRootMismatch {
        /// Root declared by the header
        declared: ContentAddress,
        /// Root rebuilt from the transaction list
        computed: ContentAddress,
    },

    /// A node's address differs from the one it was expected to have
    #[error("address verification failed: expected {expected}, got {actual}")]
    VerificationFailed {
        /// The expected address
        expected: ContentAddress,
        /// The address computed from the node
        actual: ContentAddress,
    },

    /// A configured decode limit was exceeded
    #[error("{what} of {value} exceeds limit of {limit}")]
    LimitExceeded {
        /// The limited quantity
        what: &'static str,
        /// The configured limit
        limit: u64,
        /// The value found in the message
        value: u64,
    },

    /// Bytes remain after the last declared transaction
    #[error("{remaining} trailing bytes after the last transaction")]
    TrailingBytes {
        /// Number of unconsumed bytes
        remaining: usize,
    },

    /// A failure annotated with the phase it happened in
    #[error("failed to read {location}: {source}")]
    Context {
        /// Where the failure happened
        location: Location,
        /// The underlying failure
        #[source]
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    /// Build a [`DecodeError::MalformedField`]
    pub fn malformed<S: Into<String>>(field: &'static str, reason: S) -> Self {
        Self::MalformedField {
            field,
            reason: reason.into(),
        }
    }

    /// Build a [`DecodeError::LimitExceeded`]
    pub const fn limit_exceeded(what: &'static str, limit: u64, value: u64) -> Self {
        Self::LimitExceeded { what, limit, value }
    }

    /// Annotate this error with the location it happened at
    pub fn at(self, location: Location) -> Self {
        Self::Context {
            location,
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping phase annotations
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Context { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// The annotated location, if any
    pub const fn location(&self) -> Option<Location> {
        match self {
            Self::Context { location, .. } => Some(*location),
            _ => None,
        }
    }

    /// The decode phase, if annotated
    pub fn phase(&self) -> Option<Phase> {
        self.location().map(|location| location.phase)
    }

    /// The failing transaction index, if the failure happened in a transaction
    pub fn tx_index(&self) -> Option<u64> {
        self.location()
            .and_then(|location| location.tx)
            .map(|(index, _)| index)
    }
}
