//! Compact-size unsigned integers
//!
//! Reading lives on [`ByteReader::read_compact_size`](crate::ByteReader::read_compact_size);
//! this module holds the discriminants and the encoder used when nodes are
//! re-serialized.

use bytes::{BufMut, Bytes, BytesMut};

/// Discriminant for a 2-byte payload
pub const U16_PREFIX: u8 = 0xfd;
/// Discriminant for a 4-byte payload
pub const U32_PREFIX: u8 = 0xfe;
/// Discriminant for an 8-byte payload
pub const U64_PREFIX: u8 = 0xff;

/// Number of bytes `value` occupies when encoded
pub const fn encoded_len(value: u64) -> usize {
    match value {
        0..=0xfc => 1,
        0xfd..=0xffff => 3,
        0x1_0000..=0xffff_ffff => 5,
        _ => 9,
    }
}

/// Append the encoding of `value` to `buf`
pub fn put(buf: &mut impl BufMut, value: u64) {
    match value {
        0..=0xfc => buf.put_u8(value as u8),
        0xfd..=0xffff => {
            buf.put_u8(U16_PREFIX);
            buf.put_u16_le(value as u16);
        }
        0x1_0000..=0xffff_ffff => {
            buf.put_u8(U32_PREFIX);
            buf.put_u32_le(value as u32);
        }
        _ => {
            buf.put_u8(U64_PREFIX);
            buf.put_u64_le(value);
        }
    }
}

/// Encode `value` on its own
pub fn encode(value: u64) -> Bytes {
    let mut buf = BytesMut::with_capacity(encoded_len(value));
    put(&mut buf, value);
    buf.freeze()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(encode(0xfc).as_ref(), &[0xfc]);
        assert_eq!(encode(0xfd).as_ref(), &[0xfd, 0xfd, 0x00]);
        assert_eq!(encode(0xffff).as_ref(), &[0xfd, 0xff, 0xff]);
        assert_eq!(encode(0x1_0000).as_ref(), &[0xfe, 0x00, 0x00, 0x01, 0x00]);
        assert_eq!(encode(u64::MAX).len(), 9);
        assert_eq!(encoded_len(0x1_0000_0000), 9);
    }
}
