//! Decode limits
//!
//! A block message declares its own transaction count and field lengths.
//! [`DecodeLimits`] caps what the decoder is willing to accept before it
//! allocates for those declarations.

use crate::transaction::MIN_TRANSACTION_SIZE;

/// Largest serialized block accepted by default (the consensus weight limit
/// bounds a block's serialized size to 4,000,000 bytes).
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 4_000_000;

/// Largest transaction count accepted by default: as many minimum-size
/// transactions as fit in a maximum-size block.
pub const DEFAULT_MAX_TRANSACTIONS: u64 =
    (DEFAULT_MAX_MESSAGE_SIZE / MIN_TRANSACTION_SIZE) as u64;

/// Caps applied while decoding a block message
///
/// # Examples
///
/// ```
/// use blockgraph_btc::{BlockDecoder, DecodeLimits};
///
/// let limits = DecodeLimits::default().with_max_transactions(10);
/// let decoder = BlockDecoder::new(limits);
/// assert_eq!(decoder.limits().max_transactions(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DecodeLimits {
    max_message_size: usize,
    max_transactions: u64,
}

impl DecodeLimits {
    /// Limits matching the consensus block size
    pub const fn new() -> Self {
        Self {
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
            max_transactions: DEFAULT_MAX_TRANSACTIONS,
        }
    }

    /// No caps beyond what the message itself can hold
    pub const fn unbounded() -> Self {
        Self {
            max_message_size: usize::MAX,
            max_transactions: u64::MAX,
        }
    }

    /// Set the largest accepted message, in bytes
    pub const fn with_max_message_size(mut self, max: usize) -> Self {
        self.max_message_size = max;
        self
    }

    /// Set the largest accepted transaction count
    pub const fn with_max_transactions(mut self, max: u64) -> Self {
        self.max_transactions = max;
        self
    }

    /// Largest accepted message, in bytes
    pub const fn max_message_size(&self) -> usize {
        self.max_message_size
    }

    /// Largest accepted transaction count
    pub const fn max_transactions(&self) -> u64 {
        self.max_transactions
    }
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self::new()
    }
}
