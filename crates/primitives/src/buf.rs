use crate::macros::internal;

/// A 20-byte buffer, sized for hash160 digests and ledger addresses.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Buf20(pub [u8; 20]);

internal::impl_buf_core!(Buf20, 20);
internal::impl_buf_fmt!(Buf20, 20);
internal::impl_buf_borsh!(Buf20, 20);
internal::impl_buf_arbitrary!(Buf20, 20);
internal::impl_buf_serde!(Buf20, 20);

/// A 32-byte buffer.
///
/// Holds double-SHA256 digests in their internal (little-endian) byte order,
/// which is the order txids and block hashes take on the wire.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Buf32(pub [u8; 32]);

internal::impl_buf_core!(Buf32, 32);
internal::impl_buf_fmt!(Buf32, 32);
internal::impl_buf_borsh!(Buf32, 32);
internal::impl_buf_arbitrary!(Buf32, 32);
internal::impl_buf_serde!(Buf32, 32);

impl Buf32 {
    /// Returns a copy with the byte order reversed, i.e. the form block
    /// explorers display.
    pub fn reversed(&self) -> Self {
        let mut out = self.0;
        out.reverse();
        Self(out)
    }
}

#[cfg(test)]
mod tests {
    use borsh::BorshDeserialize;

    use super::*;

    #[test]
    fn test_zero_and_default() {
        assert!(Buf32::zero().is_zero());
        assert_eq!(Buf20::default(), Buf20::zero());
        assert!(!Buf32::new([1; 32]).is_zero());
    }

    #[test]
    fn test_try_from_slice() {
        let bytes = [7u8; 20];
        assert_eq!(Buf20::try_from(&bytes[..]).unwrap(), Buf20::new(bytes));
        assert!(Buf20::try_from(&bytes[..19]).is_err());
    }

    #[test]
    fn test_display_truncates() {
        let mut data = [0u8; 32];
        data[0] = 0xab;
        data[31] = 0xcd;
        assert_eq!(format!("{}", Buf32(data)), "ab0000..0000cd");
        assert_eq!(format!("{:?}", Buf32(data)).len(), 64);
    }

    #[test]
    fn test_serialize_hex() {
        let buf = Buf20([1u8; 20]);
        let json = serde_json::to_string(&buf).unwrap();
        assert_eq!(json, format!("\"{}\"", hex::encode([1u8; 20])));
    }

    #[test]
    fn test_deserialize_hex_with_prefix() {
        let data = [3u8; 32];
        let json = format!("\"0x{}\"", hex::encode(data));
        let buf: Buf32 = serde_json::from_str(&json).unwrap();
        assert_eq!(buf, Buf32(data));
    }

    #[test]
    fn test_deserialize_wrong_length() {
        let json = format!("\"{}\"", hex::encode([3u8; 31]));
        assert!(serde_json::from_str::<Buf32>(&json).is_err());
    }

    #[test]
    fn test_deserialize_from_seq() {
        let data = [5u8; 20];
        let json = serde_json::to_string(&data).unwrap();
        let buf: Buf20 = serde_json::from_str(&json).unwrap();
        assert_eq!(buf, Buf20(data));
    }

    #[test]
    fn test_borsh_is_raw_bytes() {
        let buf = Buf32([9u8; 32]);
        let encoded = borsh::to_vec(&buf).unwrap();
        assert_eq!(encoded, vec![9u8; 32]);
        assert_eq!(Buf32::try_from_slice(&encoded).unwrap(), buf);
    }

    #[test]
    fn test_reversed() {
        let mut data = [0u8; 32];
        data[0] = 1;
        assert_eq!(Buf32(data).reversed().0[31], 1);
    }
}
