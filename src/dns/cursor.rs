use super::error::{DecodeError, DecodeResult};

/// Bounds-checked sequential reader over a borrowed DNS message.
///
/// The buffer is never modified; only the read position moves.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// The whole underlying buffer, independent of the read position.
    #[inline]
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    #[inline]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Moves the read position. Positions past the end of the buffer are
    /// rejected; `pos == len` is allowed and leaves nothing to read.
    pub fn set_position(&mut self, pos: usize) -> DecodeResult<()> {
        if pos > self.data.len() {
            return Err(DecodeError::truncated(pos, 0));
        }
        self.pos = pos;
        Ok(())
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Fails with `Truncated` unless `n` more bytes can be read.
    #[inline]
    pub fn ensure(&self, n: usize) -> DecodeResult<()> {
        if self.remaining() < n {
            return Err(DecodeError::truncated(self.pos, n));
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        self.ensure(1)?;
        let value = self.data[self.pos];
        self.pos += 1;
        Ok(value)
    }

    pub fn read_u16_be(&mut self) -> DecodeResult<u16> {
        let bytes = self.read_array::<2>()?;
        Ok(u16::from_be_bytes(bytes))
    }

    pub fn read_u32_be(&mut self) -> DecodeResult<u32> {
        let bytes = self.read_array::<4>()?;
        Ok(u32::from_be_bytes(bytes))
    }

    /// Consumes `n` bytes and returns them as a slice of the underlying buffer.
    pub fn read_bytes(&mut self, n: usize) -> DecodeResult<&'a [u8]> {
        self.ensure(n)?;
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_array<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_big_endian_fields() {
        let data = [0x12, 0x34, 0x00, 0x00, 0x00, 0x3c, 0xff];
        let mut cursor = ByteCursor::new(&data);

        assert_eq!(cursor.read_u16_be().unwrap(), 0x1234);
        assert_eq!(cursor.read_u32_be().unwrap(), 60);
        assert_eq!(cursor.read_u8().unwrap(), 0xff);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn short_reads_fail_without_moving() {
        let data = [0x01, 0x02, 0x03];
        let mut cursor = ByteCursor::new(&data);
        cursor.read_u8().unwrap();

        assert_eq!(
            cursor.read_u32_be(),
            Err(DecodeError::Truncated { offset: 1, needed: 4 })
        );
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.read_bytes(2).unwrap(), &[0x02, 0x03]);
        assert!(cursor.read_u16_be().is_err());
    }

    #[test]
    fn read_bytes_borrows_from_input() {
        let data = b"\x03www";
        let mut cursor = ByteCursor::new(data);
        cursor.read_u8().unwrap();
        let label = cursor.read_bytes(3).unwrap();
        assert_eq!(label, b"www");
        assert!(std::ptr::eq(label.as_ptr(), data[1..].as_ptr()));
    }

    #[test]
    fn set_position_is_bounds_checked() {
        let data = [0u8; 4];
        let mut cursor = ByteCursor::new(&data);

        cursor.set_position(4).unwrap();
        assert_eq!(cursor.remaining(), 0);
        assert!(cursor.set_position(5).is_err());
        assert_eq!(cursor.position(), 4);
    }
}
