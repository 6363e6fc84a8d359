use crate::EncodeError;

/// Sequential writer into a caller-owned buffer. A write that does not fit
/// fails with [`EncodeError::BufferTooSmall`] and leaves the buffer as it was.
#[derive(Debug)]
pub struct Writer<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> Writer<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, len: 0 }
    }

    /// Octets written so far.
    pub const fn position(&self) -> usize {
        self.len
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.len
    }

    pub fn as_written(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn write_u8(&mut self, value: u8) -> Result<(), EncodeError> {
        self.write_all(&[value])
    }

    pub fn write_all(&mut self, data: &[u8]) -> Result<(), EncodeError> {
        let dest = self
            .buf
            .get_mut(self.len..)
            .and_then(|free| free.get_mut(..data.len()))
            .ok_or(EncodeError::BufferTooSmall)?;
        dest.copy_from_slice(data);
        self.len += data.len();
        Ok(())
    }

    pub fn write_be_u16(&mut self, value: u16) -> Result<(), EncodeError> {
        self.write_all(&value.to_be_bytes())
    }

    pub fn write_be_u32(&mut self, value: u32) -> Result<(), EncodeError> {
        self.write_all(&value.to_be_bytes())
    }
}
