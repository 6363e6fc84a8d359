use crate::apdu::ApduType;
use crate::encoding::{reader::Reader, writer::Writer};
use crate::{DecodeError, EncodeError};

/// Header for a BACnet Unconfirmed-Request APDU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnconfirmedRequestHeader {
    pub service_choice: u8,
}

impl UnconfirmedRequestHeader {
    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_u8(ApduType::UnconfirmedRequest.octet(0))?;
        w.write_u8(self.service_choice)
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        ApduType::UnconfirmedRequest.read_flags(r)?;
        let service_choice = r.read_u8()?;
        Ok(Self { service_choice })
    }
}
