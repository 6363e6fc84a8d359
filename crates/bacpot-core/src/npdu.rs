use crate::encoding::{reader::Reader, writer::Writer};
use crate::{DecodeError, EncodeError};

/// BACnet network layer protocol version (always `0x01`).
pub const NPDU_VERSION: u8 = 0x01;

const CONTROL_NETWORK_MESSAGE: u8 = 0x80;
const CONTROL_HAS_DESTINATION: u8 = 0x20;
const CONTROL_HAS_SOURCE: u8 = 0x08;
const CONTROL_EXPECTING_REPLY: u8 = 0x04;
const PROPRIETARY_MESSAGE: u8 = 0x80;

/// Network number addressing every network.
pub const GLOBAL_BROADCAST_NETWORK: u16 = 0xFFFF;

/// A network-layer address consisting of a network number and a MAC address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NpduAddress {
    /// The DNET/SNET network number.
    pub network: u16,
    /// MAC address bytes (up to 6).
    pub mac: [u8; 6],
    /// Number of valid bytes in `mac`; zero means broadcast on `network`.
    pub mac_len: u8,
}

impl NpduAddress {
    pub const fn broadcast(network: u16) -> Self {
        Self {
            network,
            mac: [0; 6],
            mac_len: 0,
        }
    }

    pub fn mac(&self) -> &[u8] {
        &self.mac[..usize::from(self.mac_len).min(6)]
    }

    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        if usize::from(self.mac_len) > self.mac.len() {
            return Err(EncodeError::InvalidLength);
        }
        w.write_be_u16(self.network)?;
        w.write_u8(self.mac_len)?;
        w.write_all(self.mac())
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let network = r.read_be_u16()?;
        let mac_len = r.read_u8()?;
        let mut mac = [0u8; 6];
        mac.get_mut(..usize::from(mac_len))
            .ok_or(DecodeError::InvalidLength)?
            .copy_from_slice(r.read_exact(usize::from(mac_len))?);
        Ok(Self {
            network,
            mac,
            mac_len,
        })
    }
}

/// Network-layer message type and, for proprietary types (0x80 and up), the
/// vendor that defines it. Such NPDUs carry no APDU and are never answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkMessage {
    pub message_type: u8,
    pub vendor_id: Option<u16>,
}

/// BACnet Network Protocol Data Unit (NPDU) header.
///
/// Routing fields are parsed so they can be skipped on receive and echoed
/// back on reply; this device never routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Npdu {
    pub control: u8,
    pub destination: Option<NpduAddress>,
    pub source: Option<NpduAddress>,
    pub hop_count: Option<u8>,
    pub network_message: Option<NetworkMessage>,
}

impl Npdu {
    pub const fn new(control: u8) -> Self {
        Self {
            control,
            destination: None,
            source: None,
            hop_count: None,
            network_message: None,
        }
    }

    const fn to(destination: NpduAddress) -> Self {
        Self {
            control: CONTROL_HAS_DESTINATION,
            destination: Some(destination),
            source: None,
            hop_count: Some(255),
            network_message: None,
        }
    }

    /// Header for an APDU sent to every network (DNET 0xFFFF).
    pub const fn global_broadcast() -> Self {
        Self::to(NpduAddress::broadcast(GLOBAL_BROADCAST_NETWORK))
    }

    /// Header for a unicast reply to `request`.
    ///
    /// A request that crossed a router carries its origin as SNET/SADR; the
    /// reply addresses it as DNET/DADR so the router can deliver it.
    pub fn reply_to(request: &Npdu) -> Self {
        request.source.map_or(Self::new(0), Self::to)
    }

    /// True when the NPDU carries a network-layer message instead of an APDU.
    pub const fn is_network_message(&self) -> bool {
        self.control & CONTROL_NETWORK_MESSAGE != 0
    }

    pub const fn expecting_reply(&self) -> bool {
        self.control & CONTROL_EXPECTING_REPLY != 0
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_all(&[NPDU_VERSION, self.control])?;
        if let Some(destination) = &self.destination {
            destination.encode(w)?;
        }
        if let Some(source) = &self.source {
            source.encode(w)?;
        }
        if self.destination.is_some() {
            w.write_u8(self.hop_count.unwrap_or(255))?;
        }
        if self.is_network_message() {
            let message = self.network_message.unwrap_or(NetworkMessage {
                message_type: 0,
                vendor_id: None,
            });
            w.write_u8(message.message_type)?;
            if message.message_type >= PROPRIETARY_MESSAGE {
                w.write_be_u16(message.vendor_id.unwrap_or(0))?;
            }
        }
        Ok(())
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        if r.read_u8()? != NPDU_VERSION {
            return Err(DecodeError::InvalidValue);
        }
        let mut npdu = Self::new(r.read_u8()?);

        if npdu.control & CONTROL_HAS_DESTINATION != 0 {
            npdu.destination = Some(NpduAddress::decode(r)?);
        }
        if npdu.control & CONTROL_HAS_SOURCE != 0 {
            npdu.source = Some(NpduAddress::decode(r)?);
        }
        if npdu.destination.is_some() {
            npdu.hop_count = Some(r.read_u8()?);
        }
        if npdu.is_network_message() {
            let message_type = r.read_u8()?;
            let vendor_id = if message_type >= PROPRIETARY_MESSAGE {
                Some(r.read_be_u16()?)
            } else {
                None
            };
            npdu.network_message = Some(NetworkMessage {
                message_type,
                vendor_id,
            });
        }
        Ok(npdu)
    }
}
