/// A borrowed BACnet bit string: packed bits, most significant bit first,
/// with `unused_bits` padding bits at the end of the last byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitString<'a> {
    pub unused_bits: u8,
    pub data: &'a [u8],
}

impl<'a> BitString<'a> {
    pub const fn new(unused_bits: u8, data: &'a [u8]) -> Self {
        Self { unused_bits, data }
    }

    /// Number of meaningful bits.
    pub fn bit_len(&self) -> usize {
        (self.data.len() * 8).saturating_sub(self.unused_bits as usize)
    }

    /// Returns bit `index`, counting from the first transmitted bit.
    pub fn bit(&self, index: usize) -> Option<bool> {
        if index >= self.bit_len() {
            return None;
        }
        let byte = self.data[index / 8];
        Some(byte & (0x80 >> (index % 8)) != 0)
    }
}
