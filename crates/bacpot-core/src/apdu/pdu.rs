use crate::encoding::reader::Reader;
use crate::DecodeError;

/// The PDU type carried in the high nibble of the first APDU octet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ApduType {
    ConfirmedRequest = 0,
    UnconfirmedRequest = 1,
    SimpleAck = 2,
    ComplexAck = 3,
    SegmentAck = 4,
    Error = 5,
    Reject = 6,
    Abort = 7,
}

impl ApduType {
    /// Maps a PDU type nibble; 8-15 are reserved and yield `None`.
    pub fn from_u8(value: u8) -> Option<Self> {
        Some(match value {
            0 => Self::ConfirmedRequest,
            1 => Self::UnconfirmedRequest,
            2 => Self::SimpleAck,
            3 => Self::ComplexAck,
            4 => Self::SegmentAck,
            5 => Self::Error,
            6 => Self::Reject,
            7 => Self::Abort,
            _ => return None,
        })
    }

    /// Classifies an APDU by its first octet.
    pub fn from_first_octet(octet: u8) -> Option<Self> {
        Self::from_u8(octet >> 4)
    }

    /// First APDU octet for this type with the given low-nibble flags.
    pub(crate) const fn octet(self, flags: u8) -> u8 {
        ((self as u8) << 4) | (flags & 0x0F)
    }

    /// Consumes the first octet, failing unless it carries this type.
    /// Returns the low-nibble flags.
    pub(crate) fn read_flags(self, r: &mut Reader<'_>) -> Result<u8, DecodeError> {
        let octet = r.read_u8()?;
        if octet >> 4 != self as u8 {
            return Err(DecodeError::InvalidValue);
        }
        Ok(octet & 0x0F)
    }
}
