//! Classifies an incoming APDU and routes requests to their handler.

use crate::config::ServerConfig;
use crate::handlers::{self, Indication};
use crate::response::ServiceResponse;
use crate::transmit::MAX_APDU_LEN;
use bacpot_core::apdu::{ApduType, ConfirmedRequestHeader, RejectPdu, UnconfirmedRequestHeader};
use bacpot_core::encoding::reader::Reader;
use bacpot_core::npdu::Npdu;
use bacpot_core::services::read_property::{ReadPropertyRequest, SERVICE_READ_PROPERTY};
use bacpot_core::services::read_property_multiple::{
    ReadPropertyMultipleRequest, SERVICE_READ_PROPERTY_MULTIPLE,
};
use bacpot_core::services::who_has::{WhoHasRequest, SERVICE_WHO_HAS};
use bacpot_core::services::who_is::{WhoIsRequest, SERVICE_WHO_IS};
use bacpot_core::types::RejectReason;
use bacpot_core::DecodeError;
use bacpot_datalink::DataLinkAddress;
use bacpot_device::Device;

/// What arrived, judged by the PDU type nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicationState {
    ConfirmedRequest,
    UnconfirmedRequest,
    SimpleAck,
    ComplexAck,
    SegmentAck,
    Error,
    Reject,
    Abort,
    /// PDU types 8-15.
    Reserved(u8),
    /// No APDU at all, e.g. a network-layer message.
    Unrecognized,
}

impl IndicationState {
    pub fn classify(npdu: &Npdu, apdu: &[u8]) -> Self {
        if npdu.is_network_message() {
            return Self::Unrecognized;
        }
        let Some(first) = apdu.first() else {
            return Self::Unrecognized;
        };
        match ApduType::from_first_octet(*first) {
            Some(ApduType::ConfirmedRequest) => Self::ConfirmedRequest,
            Some(ApduType::UnconfirmedRequest) => Self::UnconfirmedRequest,
            Some(ApduType::SimpleAck) => Self::SimpleAck,
            Some(ApduType::ComplexAck) => Self::ComplexAck,
            Some(ApduType::SegmentAck) => Self::SegmentAck,
            Some(ApduType::Error) => Self::Error,
            Some(ApduType::Reject) => Self::Reject,
            Some(ApduType::Abort) => Self::Abort,
            None => Self::Reserved(first >> 4),
        }
    }
}

/// A decoded service request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceRequest<'a> {
    WhoIs(WhoIsRequest),
    WhoHas(WhoHasRequest<'a>),
    ReadProperty(ReadPropertyRequest),
    ReadPropertyMultiple(ReadPropertyMultipleRequest),
    Unsupported { service_choice: u8 },
}

type Decoder = for<'a> fn(&mut Reader<'a>) -> Result<ServiceRequest<'a>, DecodeError>;

struct ServiceEntry {
    choice: u8,
    name: &'static str,
    decode: Decoder,
}

const CONFIRMED_SERVICES: &[ServiceEntry] = &[
    ServiceEntry {
        choice: SERVICE_READ_PROPERTY,
        name: "read-property",
        decode: decode_read_property,
    },
    ServiceEntry {
        choice: SERVICE_READ_PROPERTY_MULTIPLE,
        name: "read-property-multiple",
        decode: decode_read_property_multiple,
    },
];

const UNCONFIRMED_SERVICES: &[ServiceEntry] = &[
    ServiceEntry {
        choice: SERVICE_WHO_HAS,
        name: "who-has",
        decode: decode_who_has,
    },
    ServiceEntry {
        choice: SERVICE_WHO_IS,
        name: "who-is",
        decode: decode_who_is,
    },
];

fn decode_who_is<'a>(r: &mut Reader<'a>) -> Result<ServiceRequest<'a>, DecodeError> {
    WhoIsRequest::decode_after_header(r).map(ServiceRequest::WhoIs)
}

fn decode_who_has<'a>(r: &mut Reader<'a>) -> Result<ServiceRequest<'a>, DecodeError> {
    WhoHasRequest::decode_after_header(r).map(ServiceRequest::WhoHas)
}

fn decode_read_property<'a>(r: &mut Reader<'a>) -> Result<ServiceRequest<'a>, DecodeError> {
    ReadPropertyRequest::decode_after_header(r).map(ServiceRequest::ReadProperty)
}

fn decode_read_property_multiple<'a>(
    r: &mut Reader<'a>,
) -> Result<ServiceRequest<'a>, DecodeError> {
    ReadPropertyMultipleRequest::decode_after_header(r).map(ServiceRequest::ReadPropertyMultiple)
}

/// Decodes the service arguments after the APDU header. A choice missing
/// from `table` becomes [`ServiceRequest::Unsupported`].
fn decode_service<'a>(
    table: &[ServiceEntry],
    service_choice: u8,
    r: &mut Reader<'a>,
) -> Result<ServiceRequest<'a>, DecodeError> {
    match table.iter().find(|entry| entry.choice == service_choice) {
        Some(entry) => (entry.decode)(r).map_err(|err| {
            log::debug!("malformed {} request: {err}", entry.name);
            err
        }),
        None => Ok(ServiceRequest::Unsupported { service_choice }),
    }
}

/// Runs one request through its handler.
pub fn handle<'a>(
    request: &ServiceRequest<'_>,
    indication: &Indication<'a>,
    config: &ServerConfig,
) -> ServiceResponse<'a> {
    match request {
        ServiceRequest::WhoIs(req) => handlers::who_is::handle(req, indication),
        ServiceRequest::WhoHas(req) => handlers::who_has::handle(req, indication),
        ServiceRequest::ReadProperty(req) => handlers::read_property::handle(req, indication),
        ServiceRequest::ReadPropertyMultiple(req) => {
            handlers::read_property_multiple::handle(req, indication)
        }
        ServiceRequest::Unsupported { service_choice } => {
            log::info!(
                "unsupported service {service_choice:#04x} from {}",
                indication.source
            );
            match indication.invoke_id {
                Some(invoke_id) if config.reject_unrecognized_services => ServiceResponse::Reject(
                    RejectPdu::new(invoke_id, RejectReason::UnrecognizedService),
                ),
                _ => ServiceResponse::NoReply,
            }
        }
    }
}

/// Classifies `apdu`, decodes requests and hands them to their handler.
/// Anything that is not a request, or does not decode, gets no reply.
pub fn dispatch<'a>(
    device: &'a Device,
    config: &ServerConfig,
    npdu: &Npdu,
    apdu: &[u8],
    source: DataLinkAddress,
) -> ServiceResponse<'a> {
    let state = IndicationState::classify(npdu, apdu);
    let mut r = Reader::new(apdu);
    let (request, invoke_id, max_apdu) = match state {
        IndicationState::ConfirmedRequest => {
            let header = match ConfirmedRequestHeader::decode(&mut r) {
                Ok(header) => header,
                Err(err) => {
                    log::debug!("bad confirmed request header from {source}: {err}");
                    return ServiceResponse::NoReply;
                }
            };
            if header.is_segmented() {
                log::debug!(
                    "dropping segmented request {} from {source}",
                    header.invoke_id
                );
                return ServiceResponse::NoReply;
            }
            (
                decode_service(CONFIRMED_SERVICES, header.service_choice, &mut r),
                Some(header.invoke_id),
                header.max_apdu_octets(),
            )
        }
        IndicationState::UnconfirmedRequest => {
            let header = match UnconfirmedRequestHeader::decode(&mut r) {
                Ok(header) => header,
                Err(err) => {
                    log::debug!("bad unconfirmed request header from {source}: {err}");
                    return ServiceResponse::NoReply;
                }
            };
            (
                decode_service(UNCONFIRMED_SERVICES, header.service_choice, &mut r),
                None,
                MAX_APDU_LEN,
            )
        }
        other => {
            log::debug!("ignoring {other:?} from {source}");
            return ServiceResponse::NoReply;
        }
    };

    let request = match request {
        Ok(request) => request,
        Err(err) => {
            log::debug!("dropping request from {source}: {err}");
            return ServiceResponse::NoReply;
        }
    };

    let indication = Indication {
        device,
        source,
        invoke_id,
        max_apdu,
    };
    handle(&request, &indication, config)
}
