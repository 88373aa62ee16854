//! Reader over a borrowed byte slice

use crate::Error;

/// A cursor over a byte slice that never reads past its end
#[derive(Debug, Clone)]
pub struct SliceReader<'s> {
    slice: &'s [u8],
}

impl<'s> SliceReader<'s> {
    /// Creates a new reader
    pub fn new(slice: &'s [u8]) -> Self {
        Self { slice }
    }

    /// Bytes not read yet
    pub fn remaining(&self) -> &'s [u8] {
        self.slice
    }

    /// Whether every byte has been read
    pub fn is_empty(&self) -> bool {
        self.slice.is_empty()
    }

    /// Look at the next byte without consuming it
    pub fn peek_byte(&self) -> Result<u8, Error> {
        self.slice.first().copied().ok_or(Error::UnexpectedEof)
    }

    /// Consume the next byte
    pub fn next_byte(&mut self) -> Result<u8, Error> {
        let byte = self.peek_byte()?;
        self.slice = &self.slice[1..];
        Ok(byte)
    }

    /// Consume the next `n` bytes
    pub fn read_bytes(&mut self, n: usize) -> Result<&'s [u8], Error> {
        if self.slice.len() < n {
            return Err(Error::UnexpectedEof);
        }
        let (head, tail) = self.slice.split_at(n);
        self.slice = tail;
        Ok(head)
    }

    /// Consume exactly `N` bytes into an array
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let bytes = self.read_bytes(N)?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(bytes);
        Ok(buf)
    }

    /// Splits off a sub-reader over the next `n` bytes
    pub fn sub_reader(&mut self, n: usize) -> Result<SliceReader<'s>, Error> {
        self.read_bytes(n).map(SliceReader::new)
    }
}

macro_rules! impl_read_be {
    ($($name:ident, $ty:ty),*) => {
        impl<'s> SliceReader<'s> {
            $(
                /// Reads a big-endian number
                pub fn $name(&mut self) -> Result<$ty, Error> {
                    self.read_array().map(<$ty>::from_be_bytes)
                }
            )*
        }
    };
}

impl_read_be!(
    read_u8, u8,
    read_u16, u16,
    read_u32, u32,
    read_u64, u64,
    read_i8, i8,
    read_i16, i16,
    read_i32, i32,
    read_i64, i64,
    read_f32, f32,
    read_f64, f64
);

#[cfg(test)]
mod tests {
    use super::SliceReader;
    use crate::Error;

    #[test]
    fn reads_big_endian_and_stops_at_end() {
        let mut reader = SliceReader::new(&[0x01, 0x02, 0x03]);
        assert_eq!(reader.read_u16(), Ok(0x0102));
        assert_eq!(reader.read_u16(), Err(Error::UnexpectedEof));
        assert_eq!(reader.next_byte(), Ok(0x03));
        assert!(reader.is_empty());
    }
}
