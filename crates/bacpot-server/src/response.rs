//! What a handler decided to send back.
//!
//! Values borrow from the device model where they can; computed values
//! (`object-list`, `property-list`, array lengths) are owned.

use crate::transmit::MAX_APDU_LEN;
use bacpot_core::apdu::{BacnetError, RejectPdu};
use bacpot_core::services::i_am::IAmRequest;
use bacpot_core::services::read_property::ReadPropertyAck;
use bacpot_core::services::read_property_multiple::{
    PropertyAccessError, ReadAccessResult, ReadPropertyMultipleAck, ReadResult, ReadResultElement,
};
use bacpot_core::services::who_has::IHaveRequest;
use bacpot_core::types::{ObjectId, PropertyId};
use bacpot_device::PropertyValue;
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq)]
pub enum ServiceResponse<'a> {
    IAm(IAmRequest),
    IHave(IHaveRequest<'a>),
    ReadPropertyAck(PropertyAck<'a>),
    ReadPropertyMultipleAck(MultipleAck<'a>),
    Error(BacnetError),
    Reject(RejectPdu),
    NoReply,
}

impl ServiceResponse<'_> {
    /// Discovery answers may be broadcast; everything else goes back to the
    /// requester only.
    pub fn is_discovery(&self) -> bool {
        matches!(self, Self::IAm(_) | Self::IHave(_))
    }

    /// Largest APDU this response may take on the wire: the requester's
    /// limit for acknowledgements, the B/IP maximum otherwise.
    pub fn max_apdu(&self) -> usize {
        match self {
            Self::ReadPropertyAck(ack) => ack.max_apdu.min(MAX_APDU_LEN),
            Self::ReadPropertyMultipleAck(ack) => ack.max_apdu.min(MAX_APDU_LEN),
            _ => MAX_APDU_LEN,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyAck<'a> {
    pub invoke_id: u8,
    pub max_apdu: usize,
    pub object_id: ObjectId,
    /// Name of the resolved object. `None` for the device; never encoded.
    pub object_name: Option<&'a str>,
    pub property_id: PropertyId,
    pub array_index: Option<u32>,
    pub value: Cow<'a, PropertyValue>,
}

impl PropertyAck<'_> {
    pub fn to_wire(&self) -> ReadPropertyAck<'_> {
        ReadPropertyAck {
            object_id: self.object_id,
            property_id: self.property_id,
            array_index: self.array_index,
            value: self.value.as_data_value(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultipleAck<'a> {
    pub invoke_id: u8,
    pub max_apdu: usize,
    pub results: Vec<ObjectResults<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectResults<'a> {
    pub object_id: ObjectId,
    pub elements: Vec<ElementResult<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementResult<'a> {
    pub property_id: PropertyId,
    pub array_index: Option<u32>,
    pub result: Result<Cow<'a, PropertyValue>, PropertyAccessError>,
}

impl MultipleAck<'_> {
    pub fn to_wire(&self) -> ReadPropertyMultipleAck<'_> {
        let results = self
            .results
            .iter()
            .map(|object| ReadAccessResult {
                object_id: object.object_id,
                results: object
                    .elements
                    .iter()
                    .map(|element| ReadResultElement {
                        property_id: element.property_id,
                        array_index: element.array_index,
                        result: match &element.result {
                            Ok(value) => ReadResult::Value(value.as_data_value()),
                            Err(err) => ReadResult::Error(*err),
                        },
                    })
                    .collect(),
            })
            .collect();
        ReadPropertyMultipleAck { results }
    }
}
