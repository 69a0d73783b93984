//! Big-endian fixed-width integers, the only scalar encoding DNS uses.

use bytes::{BufMut, BytesMut};

/// A fixed-width integer with a network byte order representation.
pub trait BigEndian: Sized + Copy {
    const SIZE: usize;

    fn put_be(self, buf: &mut BytesMut);

    /// Reads `Self::SIZE` bytes. Callers guarantee the length.
    fn from_be_slice(bytes: &[u8]) -> Self;
}

macro_rules! impl_big_endian {
    ($($ty:ty),* $(,)?) => {
        $(
            impl BigEndian for $ty {
                const SIZE: usize = std::mem::size_of::<$ty>();

                fn put_be(self, buf: &mut BytesMut) {
                    buf.put_slice(&self.to_be_bytes());
                }

                fn from_be_slice(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(&bytes[..Self::SIZE]);
                    <$ty>::from_be_bytes(raw)
                }
            }
        )*
    };
}

impl_big_endian!(u8, u16, u32, i32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_be_order() {
        let mut buf = BytesMut::new();
        0xf9acu16.put_be(&mut buf);
        0x0102_0304u32.put_be(&mut buf);
        (-1i32).put_be(&mut buf);
        assert_eq!(
            &buf[..],
            &[0xf9, 0xac, 0x01, 0x02, 0x03, 0x04, 0xff, 0xff, 0xff, 0xff]
        );
    }

    #[test]
    fn test_from_be_slice() {
        assert_eq!(u16::from_be_slice(&[0x12, 0x34]), 0x1234);
        assert_eq!(u32::from_be_slice(&[0, 0, 0x0e, 0x10]), 3600);
        assert_eq!(i32::from_be_slice(&[0x80, 0, 0, 0]), i32::MIN);
        assert_eq!(u8::from_be_slice(&[7, 9]), 7);
    }
}
