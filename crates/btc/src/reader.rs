//! Position-tracked reader over a block message
//!
//! [`ByteReader`] is a forward-only cursor over a [`Bytes`] buffer. Every read
//! either returns exactly the requested bytes or fails with
//! [`DecodeError::TruncatedStream`] and leaves the cursor where it was.
//! Reads are zero-copy: returned [`Bytes`] share the message buffer.

use byteorder::{ByteOrder, LittleEndian};
use bytes::Bytes;

use crate::compact_size;
use crate::error::{DecodeError, Result};

/// Forward-only cursor over an in-memory message
#[derive(Debug, Clone)]
pub struct ByteReader {
    buf: Bytes,
    pos: usize,
}

impl ByteReader {
    /// Create a reader positioned at the start of `buf`
    pub fn new(buf: impl Into<Bytes>) -> Self {
        Self {
            buf: buf.into(),
            pos: 0,
        }
    }

    /// Current cursor position
    #[inline]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Check if the whole buffer has been consumed
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// The next byte, without consuming it
    #[inline]
    pub fn peek_u8(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    /// Everything consumed since `start`, as a slice of the message buffer
    pub fn slice_from(&self, start: usize) -> Bytes {
        self.buf.slice(start.min(self.pos)..self.pos)
    }

    /// Read exactly `n` bytes
    pub fn read_exact(&mut self, field: &'static str, n: usize) -> Result<Bytes> {
        self.ensure(field, n)?;
        let out = self.buf.slice(self.pos..self.pos + n);
        self.pos += n;
        Ok(out)
    }

    /// Read exactly `N` bytes into an array
    pub fn read_array<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N]> {
        self.ensure(field, N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }

    /// Read one byte
    pub fn read_u8(&mut self, field: &'static str) -> Result<u8> {
        Ok(self.read_array::<1>(field)?[0])
    }

    /// Read a little-endian `u16`
    pub fn read_u16_le(&mut self, field: &'static str) -> Result<u16> {
        Ok(LittleEndian::read_u16(&self.read_array::<2>(field)?))
    }

    /// Read a little-endian `u32`
    pub fn read_u32_le(&mut self, field: &'static str) -> Result<u32> {
        Ok(LittleEndian::read_u32(&self.read_array::<4>(field)?))
    }

    /// Read a little-endian `u64`
    pub fn read_u64_le(&mut self, field: &'static str) -> Result<u64> {
        Ok(LittleEndian::read_u64(&self.read_array::<8>(field)?))
    }

    /// Read a compact-size unsigned integer.
    ///
    /// A leading byte below `0xfd` is the value itself; `0xfd`, `0xfe` and
    /// `0xff` are followed by a 2-, 4- or 8-byte little-endian payload.
    /// Non-minimal encodings are rejected, so every accepted value
    /// re-serializes to the bytes it was read from.
    pub fn read_compact_size(&mut self, field: &'static str) -> Result<u64> {
        let start = self.pos;
        let value = match self.read_u8(field)? {
            compact_size::U16_PREFIX => self.read_u16_le(field).map(u64::from),
            compact_size::U32_PREFIX => self.read_u32_le(field).map(u64::from),
            compact_size::U64_PREFIX => self.read_u64_le(field),
            small => Ok(u64::from(small)),
        };

        let value = match value {
            Ok(value) => value,
            Err(err) => {
                // leave the cursor on the discriminant
                self.pos = start;
                return Err(err);
            }
        };

        if compact_size::encoded_len(value) != self.pos - start {
            self.pos = start;
            return Err(DecodeError::malformed(
                field,
                format!("non-canonical compact size encoding of {value}"),
            ));
        }
        Ok(value)
    }

    /// Read a compact-size length followed by that many bytes.
    ///
    /// A length larger than what is left in the message is a
    /// [`DecodeError::MalformedField`], not a truncation: the message is
    /// complete, so the declared length itself is wrong.
    pub fn read_var_bytes(&mut self, field: &'static str) -> Result<Bytes> {
        let start = self.pos;
        let len = self.read_compact_size(field)?;
        if len > self.remaining() as u64 {
            let remaining = self.remaining();
            self.pos = start;
            return Err(DecodeError::malformed(
                field,
                format!("declared length {len} exceeds {remaining} remaining bytes"),
            ));
        }
        self.read_exact(field, len as usize)
    }

    /// Read a compact-size element count, checking that `count` elements of at
    /// least `min_size` bytes each could still fit in the message.
    pub fn read_count(&mut self, field: &'static str, min_size: usize) -> Result<u64> {
        let start = self.pos;
        let count = self.read_compact_size(field)?;
        let fits = (self.remaining() / min_size.max(1)) as u64;
        if count > fits {
            let remaining = self.remaining();
            self.pos = start;
            return Err(DecodeError::malformed(
                field,
                format!(
                    "{count} elements of at least {min_size} bytes cannot fit in {remaining} remaining bytes"
                ),
            ));
        }
        Ok(count)
    }

    fn ensure(&self, field: &'static str, needed: usize) -> Result<()> {
        if self.remaining() < needed {
            return Err(DecodeError::TruncatedStream {
                field,
                needed,
                remaining: self.remaining(),
                position: self.pos,
            });
        }
        Ok(())
    }
}

impl From<Bytes> for ByteReader {
    fn from(buf: Bytes) -> Self {
        Self::new(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_read_exact() {
        let mut reader = ByteReader::new(Bytes::from_static(&[1, 2, 3, 4, 5]));

        assert_eq!(reader.read_exact("a", 2).unwrap().as_ref(), &[1, 2]);
        assert_eq!(reader.position(), 2);
        assert_eq!(reader.remaining(), 3);
        assert_eq!(reader.slice_from(0).as_ref(), &[1, 2]);

        let err = reader.read_exact("b", 4).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TruncatedStream {
                field: "b",
                needed: 4,
                remaining: 3,
                position: 2
            }
        ));
        // a failed read does not move the cursor
        assert_eq!(reader.position(), 2);

        assert_eq!(reader.read_exact("c", 3).unwrap().as_ref(), &[3, 4, 5]);
        assert!(reader.is_empty());
        assert_eq!(reader.peek_u8(), None);
    }

    #[test]
    fn test_read_zero_bytes() {
        let mut reader = ByteReader::new(Bytes::new());
        assert!(reader.read_exact("empty", 0).unwrap().is_empty());
        assert!(reader.read_u8("byte").is_err());
    }

    #[test]
    fn test_little_endian_integers() {
        let mut reader = ByteReader::new(Bytes::from_static(&[
            0x01, 0x02, // u16
            0x01, 0x02, 0x03, 0x04, // u32
            0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80, // u64
        ]));
        assert_eq!(reader.read_u16_le("a").unwrap(), 0x0201);
        assert_eq!(reader.read_u32_le("b").unwrap(), 0x0403_0201);
        assert_eq!(reader.read_u64_le("c").unwrap(), 0x8000_0000_0000_0001);
    }

    #[test]
    fn test_compact_size_widths() {
        let cases: &[(&[u8], u64)] = &[
            (&[0x00], 0),
            (&[0xfc], 0xfc),
            (&[0xfd, 0xfd, 0x00], 0xfd),
            (&[0xfd, 0xff, 0xff], 0xffff),
            (&[0xfe, 0x00, 0x00, 0x01, 0x00], 0x1_0000),
            (&[0xfe, 0xff, 0xff, 0xff, 0xff], 0xffff_ffff),
            (
                &[0xff, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00],
                0x1_0000_0000,
            ),
        ];

        for (bytes, expected) in cases {
            let mut reader = ByteReader::new(Bytes::copy_from_slice(bytes));
            assert_eq!(reader.read_compact_size("n").unwrap(), *expected);
            assert_eq!(reader.position(), bytes.len());
        }
    }

    #[test]
    fn test_compact_size_truncated() {
        for bytes in [&[][..], &[0xfd, 0x01][..], &[0xfe, 0, 0, 0][..], &[0xff; 8][..]] {
            let mut reader = ByteReader::new(Bytes::copy_from_slice(bytes));
            assert!(matches!(
                reader.read_compact_size("n"),
                Err(DecodeError::TruncatedStream { field: "n", .. })
            ));
            assert_eq!(reader.position(), 0);
        }
    }

    #[test]
    fn test_compact_size_non_canonical() {
        for bytes in [
            &[0xfd, 0x10, 0x00][..],
            &[0xfe, 0xff, 0xff, 0x00, 0x00][..],
            &[0xff, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00][..],
        ] {
            let mut reader = ByteReader::new(Bytes::copy_from_slice(bytes));
            assert!(matches!(
                reader.read_compact_size("n"),
                Err(DecodeError::MalformedField { field: "n", .. })
            ));
        }
    }

    #[test]
    fn test_var_bytes_length_past_end() {
        let mut reader = ByteReader::new(Bytes::from_static(&[0x05, 0xaa, 0xbb]));
        assert!(matches!(
            reader.read_var_bytes("script"),
            Err(DecodeError::MalformedField { field: "script", .. })
        ));
        assert_eq!(reader.position(), 0);

        let mut reader = ByteReader::new(Bytes::from_static(&[0x02, 0xaa, 0xbb]));
        assert_eq!(reader.read_var_bytes("script").unwrap().as_ref(), &[0xaa, 0xbb]);
    }

    #[test]
    fn test_count_bound() {
        let mut reader = ByteReader::new(Bytes::from_static(&[0x03, 0, 0, 0, 0, 0, 0]));
        assert!(reader.read_count("inputs", 3).is_err());

        let mut reader = ByteReader::new(Bytes::from_static(&[0x02, 0, 0, 0, 0, 0, 0]));
        assert_eq!(reader.read_count("inputs", 3).unwrap(), 2);
    }

    proptest! {
        #[test]
        fn test_compact_size_round_trip(value in any::<u64>()) {
            let encoded = compact_size::encode(value);
            prop_assert_eq!(encoded.len(), compact_size::encoded_len(value));

            let mut reader = ByteReader::new(encoded);
            prop_assert_eq!(reader.read_compact_size("n").unwrap(), value);
            prop_assert!(reader.is_empty());
        }
    }
}
