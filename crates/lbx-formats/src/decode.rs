//! Little-endian integer decoding
//!
//! Every integer in an LBX archive is an unsigned little-endian value,
//! either 2 or 4 bytes wide. [`decode_le`] is the single primitive the
//! rest of the crate builds on.

use crate::error::{LbxError, Result};

/// Decode a 2- or 4-byte little-endian window.
///
/// # Panics
///
/// Panics if `window` is not exactly 2 or 4 bytes long. Callers always
/// slice fixed widths, so any other length is a bug in the caller and
/// must not be truncated into a plausible-looking value.
#[allow(clippy::panic)]
pub fn decode_le(window: &[u8]) -> u32 {
    match *window {
        [b0, b1] => u32::from(u16::from_le_bytes([b0, b1])),
        [b0, b1, b2, b3] => u32::from_le_bytes([b0, b1, b2, b3]),
        _ => panic!(
            "unsupported little-endian decode width: {} bytes",
            window.len()
        ),
    }
}

/// Borrow `width` bytes at `offset`, or fail with the window bounds.
pub fn window(data: &[u8], offset: usize, width: usize) -> Result<&[u8]> {
    offset
        .checked_add(width)
        .and_then(|end| data.get(offset..end))
        .ok_or(LbxError::OutOfBounds {
            offset,
            width,
            len: data.len(),
        })
}

/// Read a little-endian `u16` at `offset`.
pub fn read_u16_at(data: &[u8], offset: usize) -> Result<u16> {
    // A 2-byte window always fits in u16
    Ok(decode_le(window(data, offset, 2)?) as u16)
}

/// Read a little-endian `u32` at `offset`.
pub fn read_u32_at(data: &[u8], offset: usize) -> Result<u32> {
    Ok(decode_le(window(data, offset, 4)?))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decode_two_bytes() {
        assert_eq!(decode_le(&[0x34, 0x12]), 0x1234);
        assert_eq!(decode_le(&[0xFF, 0xFF]), 0xFFFF);
    }

    #[test]
    fn test_decode_four_bytes() {
        assert_eq!(decode_le(&[0x78, 0x56, 0x34, 0x12]), 0x1234_5678);
        assert_eq!(decode_le(&[0x00, 0x08, 0x00, 0x00]), 0x800);
    }

    #[test]
    #[should_panic(expected = "unsupported little-endian decode width: 3 bytes")]
    fn test_decode_rejects_three_bytes() {
        decode_le(&[1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "unsupported little-endian decode width: 0 bytes")]
    fn test_decode_rejects_empty() {
        decode_le(&[]);
    }

    #[test]
    fn test_read_at_bounds() {
        let data = [0x01, 0x00, 0x02, 0x00, 0x00, 0x00];
        assert_eq!(read_u16_at(&data, 0).unwrap(), 1);
        assert_eq!(read_u32_at(&data, 2).unwrap(), 2);

        assert!(matches!(
            read_u32_at(&data, 4),
            Err(LbxError::OutOfBounds {
                offset: 4,
                width: 4,
                len: 6
            })
        ));
        assert!(matches!(
            read_u16_at(&data, usize::MAX),
            Err(LbxError::OutOfBounds { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_two_and_four_byte_windows_agree(value in any::<u16>()) {
            let narrow = value.to_le_bytes();
            let wide = u32::from(value).to_le_bytes();
            prop_assert_eq!(decode_le(&narrow), decode_le(&wide));
        }

        #[test]
        fn prop_four_byte_decode_matches_std(value in any::<u32>()) {
            prop_assert_eq!(decode_le(&value.to_le_bytes()), value);
        }
    }
}
