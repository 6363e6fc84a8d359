use crate::apdu::{ComplexAckHeader, ConfirmedRequestHeader};
use crate::encoding::{
    primitives::{encode_ctx_object_id, encode_ctx_unsigned},
    reader::Reader,
    tag::Tag,
    writer::Writer,
};
use crate::services::value_codec::{decode_values_until_closing, encode_application_data_value};
use crate::services::{
    bracketed, decode_optional_ctx_unsigned, decode_required_ctx_object_id,
    decode_required_ctx_unsigned, expect_tag,
};
use crate::types::{DataValue, ObjectId, PropertyId};
use crate::{DecodeError, EncodeError};

pub const SERVICE_READ_PROPERTY: u8 = 0x0C;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadPropertyRequest {
    pub object_id: ObjectId,
    pub property_id: PropertyId,
    pub array_index: Option<u32>,
}

/// `[0] object, [1] property, [2] index`, shared by request and ack.
fn encode_reference(
    w: &mut Writer<'_>,
    object_id: ObjectId,
    property_id: PropertyId,
    array_index: Option<u32>,
) -> Result<(), EncodeError> {
    encode_ctx_object_id(w, 0, object_id.raw())?;
    encode_ctx_unsigned(w, 1, property_id.to_u32())?;
    match array_index {
        Some(index) => encode_ctx_unsigned(w, 2, index),
        None => Ok(()),
    }
}

fn decode_reference(
    r: &mut Reader<'_>,
) -> Result<(ObjectId, PropertyId, Option<u32>), DecodeError> {
    let object_id = decode_required_ctx_object_id(r, 0)?;
    let property_id = PropertyId::from_u32(decode_required_ctx_unsigned(r, 1)?);
    let array_index = decode_optional_ctx_unsigned(r, 2)?;
    Ok((object_id, property_id, array_index))
}

impl ReadPropertyRequest {
    pub fn encode(&self, w: &mut Writer<'_>, invoke_id: u8) -> Result<(), EncodeError> {
        ConfirmedRequestHeader::unsegmented(invoke_id, SERVICE_READ_PROPERTY).encode(w)?;
        encode_reference(w, self.object_id, self.property_id, self.array_index)
    }

    pub fn decode_after_header(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let (object_id, property_id, array_index) = decode_reference(r)?;
        r.expect_end()?;
        Ok(Self {
            object_id,
            property_id,
            array_index,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadPropertyAck<'a> {
    pub object_id: ObjectId,
    pub property_id: PropertyId,
    pub array_index: Option<u32>,
    pub value: DataValue<'a>,
}

impl<'a> ReadPropertyAck<'a> {
    /// Writes the complete Complex-ACK APDU.
    pub fn encode(&self, w: &mut Writer<'_>, invoke_id: u8) -> Result<(), EncodeError> {
        ComplexAckHeader::new(invoke_id, SERVICE_READ_PROPERTY).encode(w)?;
        encode_reference(w, self.object_id, self.property_id, self.array_index)?;
        bracketed(w, 3, |w| encode_application_data_value(w, &self.value))
    }

    pub fn decode_after_header(r: &mut Reader<'a>) -> Result<Self, DecodeError> {
        let (object_id, property_id, array_index) = decode_reference(r)?;
        expect_tag(r, Tag::Opening { tag_num: 3 })?;
        let value = decode_values_until_closing(r, 3)?;
        Ok(Self {
            object_id,
            property_id,
            array_index,
            value,
        })
    }
}
