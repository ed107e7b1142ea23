//! Constants used by the double-SHA256 hasher

/// Digest size in bytes (SHA-256)
pub const DIGEST_SIZE: usize = 32;

/// Size of a merkle pairing preimage (two digests)
pub const DIGEST_PAIR_LENGTH: usize = 2 * DIGEST_SIZE;

/// Multihash code for a double round of SHA-256
pub const DBL_SHA2_256: u64 = 0x56;
