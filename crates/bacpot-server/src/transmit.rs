//! Encodes a [`ServiceResponse`] down through APDU, NPDU and BVLL and picks
//! its destination.

use crate::config::{IAmAddressing, ServerConfig};
use crate::response::ServiceResponse;
use bacpot_core::encoding::writer::Writer;
use bacpot_core::npdu::Npdu;
use bacpot_core::EncodeError;
use bacpot_datalink::bip::bvlc::{encode_original_npdu, BVLC_HEADER_LEN};
use bacpot_datalink::DataLinkAddress;

/// Largest APDU a BACnet/IP device can send unsegmented.
pub const MAX_APDU_LEN: usize = 1476;

const MAX_NPDU_HEADER_LEN: usize = 32;

/// A framed datagram ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outgoing {
    pub destination: DataLinkAddress,
    pub broadcast: bool,
    pub frame: Vec<u8>,
}

/// Frames `response` for the wire. `Ok(None)` means nothing is sent: the
/// handler chose not to reply, or the reply is larger than the requester
/// accepts and would need segmentation.
pub fn encode(
    response: &ServiceResponse<'_>,
    request_npdu: &Npdu,
    requester: DataLinkAddress,
    config: &ServerConfig,
) -> Result<Option<Outgoing>, EncodeError> {
    let broadcast =
        response.is_discovery() && config.i_am_addressing == IAmAddressing::Broadcast;

    let limit = response.max_apdu();
    let mut apdu_buf = [0u8; MAX_APDU_LEN];
    let mut w = Writer::new(&mut apdu_buf[..limit]);
    let apdu_len = match encode_apdu(response, &mut w) {
        Ok(false) => return Ok(None),
        Ok(true) => w.position(),
        Err(EncodeError::BufferTooSmall) => {
            log::warn!(
                "response to {requester} exceeds {limit} octets and would need segmentation; dropped"
            );
            return Ok(None);
        }
        Err(err) => return Err(err),
    };

    let header = if broadcast {
        Npdu::global_broadcast()
    } else {
        Npdu::reply_to(request_npdu)
    };
    let mut npdu_buf = [0u8; MAX_NPDU_HEADER_LEN];
    let mut w = Writer::new(&mut npdu_buf);
    header.encode(&mut w)?;
    let npdu_len = w.position();

    let mut npdu = Vec::with_capacity(npdu_len + apdu_len);
    npdu.extend_from_slice(&npdu_buf[..npdu_len]);
    npdu.extend_from_slice(&apdu_buf[..apdu_len]);

    let mut frame = vec![0u8; BVLC_HEADER_LEN + npdu.len()];
    let frame_len = encode_original_npdu(&mut frame, broadcast, &npdu)?;
    frame.truncate(frame_len);

    let destination = if broadcast {
        requester.with_ip(config.broadcast)
    } else {
        requester
    };
    Ok(Some(Outgoing {
        destination,
        broadcast,
        frame,
    }))
}

/// Writes the APDU; `false` when there is nothing to send.
fn encode_apdu(response: &ServiceResponse<'_>, w: &mut Writer<'_>) -> Result<bool, EncodeError> {
    match response {
        ServiceResponse::NoReply => return Ok(false),
        ServiceResponse::IAm(i_am) => i_am.encode(w)?,
        ServiceResponse::IHave(i_have) => i_have.encode(w)?,
        ServiceResponse::ReadPropertyAck(ack) => ack.to_wire().encode(w, ack.invoke_id)?,
        ServiceResponse::ReadPropertyMultipleAck(ack) => {
            ack.to_wire().encode(w, ack.invoke_id)?
        }
        ServiceResponse::Error(error) => error.encode(w)?,
        ServiceResponse::Reject(reject) => reject.encode(w)?,
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::{encode, MAX_APDU_LEN};
    use crate::config::{IAmAddressing, ServerConfig};
    use crate::response::{PropertyAck, ServiceResponse};
    use bacpot_core::apdu::BacnetError;
    use bacpot_core::npdu::{Npdu, NpduAddress};
    use bacpot_core::services::i_am::IAmRequest;
    use bacpot_core::services::read_property::SERVICE_READ_PROPERTY;
    use bacpot_core::types::{ErrorClass, ErrorCode, ObjectId, ObjectType, PropertyId};
    use bacpot_datalink::DataLinkAddress;
    use bacpot_device::{BacnetObject, Device, PropertyValue};
    use std::borrow::Cow;
    use std::net::{IpAddr, Ipv4Addr, SocketAddr};

    fn requester() -> DataLinkAddress {
        DataLinkAddress::Ip(SocketAddr::new(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 7)), 50_123))
    }

    fn i_am() -> ServiceResponse<'static> {
        ServiceResponse::IAm(IAmRequest {
            device_id: ObjectId::new(ObjectType::Device, 36113),
            max_apdu: 1024,
            segmentation: 0,
            vendor_id: 15,
        })
    }

    #[test]
    fn no_reply_sends_nothing() {
        let out = encode(
            &ServiceResponse::NoReply,
            &Npdu::new(0),
            requester(),
            &ServerConfig::default(),
        )
        .unwrap();
        assert_eq!(out, None);
    }

    #[test]
    fn i_am_is_broadcast_on_requester_port() {
        let config = ServerConfig {
            broadcast: IpAddr::V4(Ipv4Addr::new(10, 0, 0, 255)),
            ..ServerConfig::default()
        };
        let out = encode(&i_am(), &Npdu::new(0), requester(), &config)
            .unwrap()
            .unwrap();
        assert!(out.broadcast);
        assert_eq!(out.destination.to_string(), "10.0.0.255:50123");
        assert_eq!(
            out.frame,
            vec![
                0x81, 0x0B, 0x00, 0x18, 0x01, 0x20, 0xFF, 0xFF, 0x00, 0xFF, 0x10, 0x00, 0xC4,
                0x02, 0x00, 0x8D, 0x11, 0x22, 0x04, 0x00, 0x91, 0x00, 0x21, 0x0F
            ]
        );
    }

    #[test]
    fn i_am_can_be_unicast() {
        let config = ServerConfig {
            i_am_addressing: IAmAddressing::Unicast,
            ..ServerConfig::default()
        };
        let out = encode(&i_am(), &Npdu::new(0), requester(), &config)
            .unwrap()
            .unwrap();
        assert!(!out.broadcast);
        assert_eq!(out.destination, requester());
        assert_eq!(&out.frame[..6], &[0x81, 0x0A, 0x00, 0x14, 0x01, 0x00]);
    }

    #[test]
    fn read_property_ack_frame() {
        let value = PropertyValue::Real(68.0);
        let ack = ServiceResponse::ReadPropertyAck(PropertyAck {
            invoke_id: 101,
            max_apdu: MAX_APDU_LEN,
            object_id: ObjectId::new(ObjectType::AnalogInput, 14),
            object_name: Some("AI 01"),
            property_id: PropertyId::PresentValue,
            array_index: None,
            value: Cow::Borrowed(&value),
        });
        let out = encode(&ack, &Npdu::new(0), requester(), &ServerConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(
            out.frame,
            vec![
                0x81, 0x0A, 0x00, 0x17, 0x01, 0x00, 0x30, 0x65, 0x0C, 0x0C, 0x00, 0x00, 0x00,
                0x0E, 0x19, 0x55, 0x3E, 0x44, 0x42, 0x88, 0x00, 0x00, 0x3F
            ]
        );
    }

    #[test]
    fn routed_request_gets_routed_reply() {
        let mut request = Npdu::new(0x08);
        request.source = Some(NpduAddress {
            network: 5,
            mac: [0x2A, 0, 0, 0, 0, 0],
            mac_len: 1,
        });
        let error = ServiceResponse::Error(BacnetError::new(
            7,
            SERVICE_READ_PROPERTY,
            ErrorClass::Object,
            ErrorCode::UnknownObject,
        ));
        let out = encode(&error, &request, requester(), &ServerConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(
            &out.frame[4..],
            &[0x01, 0x20, 0x00, 0x05, 0x01, 0x2A, 0xFF, 0x50, 0x07, 0x0C, 0x91, 0x01, 0x91, 0x1F]
        );
    }

    #[test]
    fn oversized_response_is_dropped() {
        let mut device = Device::new(1, "big").unwrap();
        for instance in 0..400 {
            device
                .register(
                    BacnetObject::new(
                        ObjectId::new(ObjectType::AnalogValue, instance),
                        format!("AV {instance}"),
                    )
                    .unwrap(),
                )
                .unwrap();
        }
        let value = device.read_property(PropertyId::ObjectList, None).unwrap();
        let ack = ServiceResponse::ReadPropertyAck(PropertyAck {
            invoke_id: 1,
            max_apdu: MAX_APDU_LEN,
            object_id: device.identifier(),
            object_name: None,
            property_id: PropertyId::ObjectList,
            array_index: None,
            value,
        });
        let out = encode(&ack, &Npdu::new(0), requester(), &ServerConfig::default()).unwrap();
        assert_eq!(out, None);
    }

    #[test]
    fn response_beyond_requester_limit_is_dropped() {
        let value = PropertyValue::CharacterString("x".repeat(60));
        let ack = |max_apdu| {
            ServiceResponse::ReadPropertyAck(PropertyAck {
                invoke_id: 9,
                max_apdu,
                object_id: ObjectId::new(ObjectType::AnalogInput, 14),
                object_name: Some("AI 01"),
                property_id: PropertyId::Description,
                array_index: None,
                value: Cow::Borrowed(&value),
            })
        };
        let config = ServerConfig::default();
        assert_eq!(
            encode(&ack(50), &Npdu::new(0), requester(), &config).unwrap(),
            None
        );
        assert!(encode(&ack(480), &Npdu::new(0), requester(), &config)
            .unwrap()
            .is_some());
    }
}
