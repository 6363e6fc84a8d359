//! BACnet Virtual Link Layer framing for B/IP (Annex J).
//!
//! Only the functions that carry an NPDU are decoded. BBMD and foreign
//! device management is out of scope for a standalone device and those
//! frames decode as [`DecodeError::Unsupported`].

use bacpot_core::encoding::{reader::Reader, writer::Writer};
use bacpot_core::{DecodeError, EncodeError};
use std::net::{Ipv4Addr, SocketAddrV4};

pub const BVLC_TYPE_BIP: u8 = 0x81;

/// BVLL header length in octets.
pub const BVLC_HEADER_LEN: usize = 4;

/// Largest datagram accepted or produced: a 1476-octet APDU plus NPDU and
/// BVLL overhead.
pub const MAX_BIP_FRAME_LEN: usize = 1600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BvlcFunction {
    ForwardedNpdu,
    DistributeBroadcastToNetwork,
    OriginalUnicastNpdu,
    OriginalBroadcastNpdu,
    /// Any management function (BVLC-Result, BDT/FDT maintenance, ...).
    Other(u8),
}

impl BvlcFunction {
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0x04 => Self::ForwardedNpdu,
            0x09 => Self::DistributeBroadcastToNetwork,
            0x0A => Self::OriginalUnicastNpdu,
            0x0B => Self::OriginalBroadcastNpdu,
            other => Self::Other(other),
        }
    }

    pub const fn to_u8(self) -> u8 {
        match self {
            Self::ForwardedNpdu => 0x04,
            Self::DistributeBroadcastToNetwork => 0x09,
            Self::OriginalUnicastNpdu => 0x0A,
            Self::OriginalBroadcastNpdu => 0x0B,
            Self::Other(code) => code,
        }
    }
}

/// A decoded BVLL datagram carrying an NPDU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BvlcFrame<'a> {
    pub function: BvlcFunction,
    /// Originating B/IP address claimed by a Forwarded-NPDU. It is written
    /// by the sender and not authenticated.
    pub origin: Option<SocketAddrV4>,
    pub npdu: &'a [u8],
}

impl<'a> BvlcFrame<'a> {
    /// Parses a whole datagram. The BVLL length must equal the datagram
    /// length, and only NPDU-carrying functions are accepted.
    pub fn decode(datagram: &'a [u8]) -> Result<Self, DecodeError> {
        let mut r = Reader::new(datagram);
        if r.read_u8()? != BVLC_TYPE_BIP {
            return Err(DecodeError::InvalidValue);
        }
        let function = BvlcFunction::from_u8(r.read_u8()?);
        if usize::from(r.read_be_u16()?) != datagram.len() {
            return Err(DecodeError::InvalidLength);
        }

        let origin = match function {
            BvlcFunction::ForwardedNpdu => {
                let [a, b, c, d] = r.read_be_u32()?.to_be_bytes();
                Some(SocketAddrV4::new(Ipv4Addr::new(a, b, c, d), r.read_be_u16()?))
            }
            BvlcFunction::OriginalUnicastNpdu
            | BvlcFunction::OriginalBroadcastNpdu
            | BvlcFunction::DistributeBroadcastToNetwork => None,
            BvlcFunction::Other(_) => return Err(DecodeError::Unsupported),
        };
        Ok(Self {
            function,
            origin,
            npdu: r.rest(),
        })
    }
}

/// Writes `npdu` behind an Original-Unicast or Original-Broadcast header and
/// returns the datagram length.
pub fn encode_original_npdu(
    out: &mut [u8],
    broadcast: bool,
    npdu: &[u8],
) -> Result<usize, EncodeError> {
    let length = u16::try_from(BVLC_HEADER_LEN + npdu.len())
        .map_err(|_| EncodeError::ValueOutOfRange)?;
    let function = if broadcast {
        BvlcFunction::OriginalBroadcastNpdu
    } else {
        BvlcFunction::OriginalUnicastNpdu
    };

    let mut w = Writer::new(out);
    w.write_all(&[BVLC_TYPE_BIP, function.to_u8()])?;
    w.write_be_u16(length)?;
    w.write_all(npdu)?;
    Ok(w.position())
}
