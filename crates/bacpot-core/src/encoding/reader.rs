use crate::DecodeError;

/// Cursor over an untrusted byte slice. Every read is bounds-checked and a
/// failed read consumes nothing.
#[derive(Debug, Clone, Copy)]
pub struct Reader<'a> {
    input: &'a [u8],
    consumed: usize,
}

impl<'a> Reader<'a> {
    pub const fn new(input: &'a [u8]) -> Self {
        Self { input, consumed: 0 }
    }

    /// Octets consumed so far.
    pub const fn position(&self) -> usize {
        self.consumed
    }

    pub const fn remaining(&self) -> usize {
        self.input.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    pub fn peek_u8(&self) -> Result<u8, DecodeError> {
        self.input.first().copied().ok_or(DecodeError::UnexpectedEof)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let [byte] = self.read_array::<1>()?;
        Ok(byte)
    }

    pub fn read_exact(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        if len > self.input.len() {
            return Err(DecodeError::UnexpectedEof);
        }
        let (head, tail) = self.input.split_at(len);
        self.input = tail;
        self.consumed += len;
        Ok(head)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_exact(N)?);
        Ok(out)
    }

    /// Consumes and returns everything not read yet.
    pub fn rest(&mut self) -> &'a [u8] {
        let rest = self.input;
        self.consumed += rest.len();
        self.input = &[];
        rest
    }

    pub fn read_be_u16(&mut self) -> Result<u16, DecodeError> {
        self.read_array().map(u16::from_be_bytes)
    }

    pub fn read_be_u32(&mut self) -> Result<u32, DecodeError> {
        self.read_array().map(u32::from_be_bytes)
    }

    /// Fails with [`DecodeError::TrailingData`] unless the input is exhausted.
    pub fn expect_end(&self) -> Result<(), DecodeError> {
        match self.input {
            [] => Ok(()),
            _ => Err(DecodeError::TrailingData),
        }
    }
}
