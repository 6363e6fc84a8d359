use crate::apdu::ApduType;
use crate::encoding::{
    primitives::{decode_app_enumerated, encode_app_enumerated},
    reader::Reader,
    writer::Writer,
};
use crate::types::{ErrorClass, ErrorCode, MaxApdu, RejectReason};
use crate::{DecodeError, EncodeError};

const SEGMENTED: u8 = 0b1000;
const MORE_FOLLOWS: u8 = 0b0100;
const SEGMENTED_RESPONSE_ACCEPTED: u8 = 0b0010;

/// Sequencing octets carried only by segmented messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub sequence_number: u8,
    pub window_size: u8,
    pub more_follows: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmedRequestHeader {
    pub segment: Option<Segment>,
    pub segmented_response_accepted: bool,
    pub max_segments: u8,
    pub max_apdu: u8,
    pub invoke_id: u8,
    pub service_choice: u8,
}

impl ConfirmedRequestHeader {
    /// A single-segment request accepting responses up to 1476 octets.
    pub const fn unsegmented(invoke_id: u8, service_choice: u8) -> Self {
        Self {
            segment: None,
            segmented_response_accepted: true,
            max_segments: 0,
            max_apdu: MaxApdu::UpTo1476.to_u8(),
            invoke_id,
            service_choice,
        }
    }

    pub const fn is_segmented(&self) -> bool {
        self.segment.is_some()
    }

    /// Largest response APDU the requester accepts. Reserved codes fall back
    /// to the 50 octet minimum.
    pub fn max_apdu_octets(&self) -> usize {
        MaxApdu::from_u32(u32::from(self.max_apdu)).map_or(50, MaxApdu::octets)
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        let mut flags = 0;
        if self.segmented_response_accepted {
            flags |= SEGMENTED_RESPONSE_ACCEPTED;
        }
        if let Some(segment) = self.segment {
            flags |= SEGMENTED;
            if segment.more_follows {
                flags |= MORE_FOLLOWS;
            }
        }
        w.write_u8(ApduType::ConfirmedRequest.octet(flags))?;
        w.write_u8(((self.max_segments & 0x07) << 4) | (self.max_apdu & 0x0F))?;
        w.write_u8(self.invoke_id)?;
        if let Some(segment) = self.segment {
            w.write_u8(segment.sequence_number)?;
            w.write_u8(segment.window_size)?;
        }
        w.write_u8(self.service_choice)
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let flags = ApduType::ConfirmedRequest.read_flags(r)?;
        let limits = r.read_u8()?;
        let invoke_id = r.read_u8()?;
        let segment = if flags & SEGMENTED != 0 {
            Some(Segment {
                sequence_number: r.read_u8()?,
                window_size: r.read_u8()?,
                more_follows: flags & MORE_FOLLOWS != 0,
            })
        } else {
            None
        };
        Ok(Self {
            segment,
            segmented_response_accepted: flags & SEGMENTED_RESPONSE_ACCEPTED != 0,
            max_segments: (limits >> 4) & 0x07,
            max_apdu: limits & 0x0F,
            invoke_id,
            service_choice: r.read_u8()?,
        })
    }
}

/// Header of an unsegmented Complex-ACK; this stack never segments replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComplexAckHeader {
    pub invoke_id: u8,
    pub service_choice: u8,
}

impl ComplexAckHeader {
    pub const fn new(invoke_id: u8, service_choice: u8) -> Self {
        Self {
            invoke_id,
            service_choice,
        }
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_u8(ApduType::ComplexAck.octet(0))?;
        w.write_u8(self.invoke_id)?;
        w.write_u8(self.service_choice)
    }

    /// Segmented acknowledgements are reported as `Unsupported`.
    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        if ApduType::ComplexAck.read_flags(r)? & SEGMENTED != 0 {
            return Err(DecodeError::Unsupported);
        }
        let invoke_id = r.read_u8()?;
        let service_choice = r.read_u8()?;
        Ok(Self::new(invoke_id, service_choice))
    }
}

/// BACnet-Error-PDU answering a confirmed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BacnetError {
    pub invoke_id: u8,
    pub service_choice: u8,
    pub error_class: u32,
    pub error_code: u32,
}

impl BacnetError {
    pub const fn new(
        invoke_id: u8,
        service_choice: u8,
        error_class: ErrorClass,
        error_code: ErrorCode,
    ) -> Self {
        Self {
            invoke_id,
            service_choice,
            error_class: error_class.to_u32(),
            error_code: error_code.to_u32(),
        }
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_u8(ApduType::Error.octet(0))?;
        w.write_u8(self.invoke_id)?;
        w.write_u8(self.service_choice)?;
        encode_app_enumerated(w, self.error_class)?;
        encode_app_enumerated(w, self.error_code)
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        ApduType::Error.read_flags(r)?;
        let invoke_id = r.read_u8()?;
        let service_choice = r.read_u8()?;
        Ok(Self {
            invoke_id,
            service_choice,
            error_class: decode_app_enumerated(r)?,
            error_code: decode_app_enumerated(r)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RejectPdu {
    pub invoke_id: u8,
    pub reason: u8,
}

impl RejectPdu {
    pub const fn new(invoke_id: u8, reason: RejectReason) -> Self {
        Self {
            invoke_id,
            reason: reason.to_u8(),
        }
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_all(&[ApduType::Reject.octet(0), self.invoke_id, self.reason])
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        ApduType::Reject.read_flags(r)?;
        let invoke_id = r.read_u8()?;
        let reason = r.read_u8()?;
        Ok(Self { invoke_id, reason })
    }
}

#[cfg(test)]
mod tests {
    use super::{BacnetError, ComplexAckHeader, ConfirmedRequestHeader, RejectPdu, Segment};
    use crate::encoding::{reader::Reader, writer::Writer};
    use crate::types::{ErrorClass, ErrorCode, RejectReason};
    use crate::DecodeError;

    #[test]
    fn read_property_request_header() {
        let mut buf = [0u8; 8];
        let mut w = Writer::new(&mut buf);
        ConfirmedRequestHeader::unsegmented(101, 0x0C)
            .encode(&mut w)
            .unwrap();
        assert_eq!(w.as_written(), &[0x02, 0x05, 0x65, 0x0C]);

        let mut r = Reader::new(w.as_written());
        let hdr = ConfirmedRequestHeader::decode(&mut r).unwrap();
        assert!(!hdr.is_segmented());
        assert_eq!(hdr.invoke_id, 101);
        assert_eq!(hdr.max_apdu_octets(), 1476);
    }

    #[test]
    fn segmented_request_carries_sequence_octets() {
        let mut r = Reader::new(&[0x0C, 0x05, 0x01, 0x00, 0x04, 0x0E]);
        let hdr = ConfirmedRequestHeader::decode(&mut r).unwrap();
        assert_eq!(
            hdr.segment,
            Some(Segment {
                sequence_number: 0,
                window_size: 4,
                more_follows: true,
            })
        );
        assert_eq!(hdr.service_choice, 0x0E);
        assert!(r.is_empty());
    }

    #[test]
    fn reserved_max_apdu_code_means_minimum() {
        let mut r = Reader::new(&[0x00, 0x0F, 0x01, 0x0C]);
        let hdr = ConfirmedRequestHeader::decode(&mut r).unwrap();
        assert_eq!(hdr.max_apdu_octets(), 50);
    }

    #[test]
    fn segmented_complex_ack_is_unsupported() {
        let mut r = Reader::new(&[0x38, 0x01, 0x00, 0x01, 0x0C]);
        assert_eq!(
            ComplexAckHeader::decode(&mut r).unwrap_err(),
            DecodeError::Unsupported
        );
    }

    #[test]
    fn unknown_object_error_bytes() {
        let mut buf = [0u8; 16];
        let mut w = Writer::new(&mut buf);
        BacnetError::new(7, 0x0C, ErrorClass::Object, ErrorCode::UnknownObject)
            .encode(&mut w)
            .unwrap();
        assert_eq!(w.as_written(), &[0x50, 0x07, 0x0C, 0x91, 0x01, 0x91, 0x1F]);

        let mut r = Reader::new(w.as_written());
        let decoded = BacnetError::decode(&mut r).unwrap();
        assert_eq!(decoded.error_class, 1);
        assert_eq!(decoded.error_code, 31);
    }

    #[test]
    fn reject_bytes() {
        let mut buf = [0u8; 8];
        let mut w = Writer::new(&mut buf);
        RejectPdu::new(3, RejectReason::UnrecognizedService)
            .encode(&mut w)
            .unwrap();
        assert_eq!(w.as_written(), &[0x60, 0x03, 0x09]);
    }

    #[test]
    fn pdu_type_mismatch_is_invalid() {
        let mut r = Reader::new(&[0x50, 0x03, 0x09]);
        assert_eq!(
            RejectPdu::decode(&mut r).unwrap_err(),
            DecodeError::InvalidValue
        );
    }
}
