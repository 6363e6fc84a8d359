use crate::apdu::{ComplexAckHeader, ConfirmedRequestHeader};
use crate::encoding::{
    primitives::{
        decode_app_enumerated, encode_app_enumerated, encode_ctx_object_id, encode_ctx_unsigned,
    },
    reader::Reader,
    tag::Tag,
    writer::Writer,
};
use crate::services::value_codec::{decode_values_until_closing, encode_application_data_value};
use crate::services::{
    bracketed, decode_optional_ctx_unsigned, decode_required_ctx_object_id,
    decode_required_ctx_unsigned, expect_tag,
};
use crate::types::{DataValue, ErrorClass, ErrorCode, ObjectId, PropertyId};
use crate::{DecodeError, EncodeError};
use alloc::vec::Vec;

pub const SERVICE_READ_PROPERTY_MULTIPLE: u8 = 0x0E;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyReference {
    pub property_id: PropertyId,
    pub array_index: Option<u32>,
}

impl PropertyReference {
    pub const fn new(property_id: PropertyId) -> Self {
        Self {
            property_id,
            array_index: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadAccessSpecification {
    pub object_id: ObjectId,
    pub properties: Vec<PropertyReference>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadPropertyMultipleRequest {
    pub specs: Vec<ReadAccessSpecification>,
}

impl ReadPropertyMultipleRequest {
    pub fn encode(&self, w: &mut Writer<'_>, invoke_id: u8) -> Result<(), EncodeError> {
        ConfirmedRequestHeader::unsegmented(invoke_id, SERVICE_READ_PROPERTY_MULTIPLE)
            .encode(w)?;
        for spec in &self.specs {
            encode_ctx_object_id(w, 0, spec.object_id.raw())?;
            bracketed(w, 1, |w| {
                spec.properties.iter().try_for_each(|reference| {
                    encode_ctx_unsigned(w, 0, reference.property_id.to_u32())?;
                    match reference.array_index {
                        Some(index) => encode_ctx_unsigned(w, 1, index),
                        None => Ok(()),
                    }
                })
            })?;
        }
        Ok(())
    }

    /// Decodes the request body. At least one specification with at least
    /// one property reference is required.
    pub fn decode_after_header(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let mut specs = Vec::new();
        while !r.is_empty() {
            let object_id = decode_required_ctx_object_id(r, 0)?;
            expect_tag(r, Tag::Opening { tag_num: 1 })?;

            let mut properties = Vec::new();
            while Tag::peek(r)? != (Tag::Closing { tag_num: 1 }) {
                properties.push(PropertyReference {
                    property_id: PropertyId::from_u32(decode_required_ctx_unsigned(r, 0)?),
                    array_index: decode_optional_ctx_unsigned(r, 1)?,
                });
            }
            Tag::decode(r)?;

            if properties.is_empty() {
                return Err(DecodeError::InvalidValue);
            }
            specs.push(ReadAccessSpecification {
                object_id,
                properties,
            });
        }
        if specs.is_empty() {
            return Err(DecodeError::UnexpectedEof);
        }
        Ok(Self { specs })
    }
}

/// `[5]` error block attached to a single failed read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyAccessError {
    pub error_class: u32,
    pub error_code: u32,
}

impl PropertyAccessError {
    pub const fn new(error_class: ErrorClass, error_code: ErrorCode) -> Self {
        Self {
            error_class: error_class.to_u32(),
            error_code: error_code.to_u32(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReadResult<'a> {
    Value(DataValue<'a>),
    Error(PropertyAccessError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadResultElement<'a> {
    pub property_id: PropertyId,
    pub array_index: Option<u32>,
    pub result: ReadResult<'a>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadAccessResult<'a> {
    pub object_id: ObjectId,
    pub results: Vec<ReadResultElement<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReadPropertyMultipleAck<'a> {
    pub results: Vec<ReadAccessResult<'a>>,
}

impl<'a> ReadResultElement<'a> {
    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        encode_ctx_unsigned(w, 2, self.property_id.to_u32())?;
        if let Some(index) = self.array_index {
            encode_ctx_unsigned(w, 3, index)?;
        }
        match &self.result {
            ReadResult::Value(value) => bracketed(w, 4, |w| encode_application_data_value(w, value)),
            ReadResult::Error(err) => bracketed(w, 5, |w| {
                encode_app_enumerated(w, err.error_class)?;
                encode_app_enumerated(w, err.error_code)
            }),
        }
    }

    fn decode(r: &mut Reader<'a>) -> Result<Self, DecodeError> {
        let property_id = PropertyId::from_u32(decode_required_ctx_unsigned(r, 2)?);
        let array_index = decode_optional_ctx_unsigned(r, 3)?;
        let result = match Tag::decode(r)? {
            Tag::Opening { tag_num: 4 } => ReadResult::Value(decode_values_until_closing(r, 4)?),
            Tag::Opening { tag_num: 5 } => {
                let error_class = decode_app_enumerated(r)?;
                let error_code = decode_app_enumerated(r)?;
                expect_tag(r, Tag::Closing { tag_num: 5 })?;
                ReadResult::Error(PropertyAccessError {
                    error_class,
                    error_code,
                })
            }
            _ => return Err(DecodeError::InvalidTag),
        };
        Ok(Self {
            property_id,
            array_index,
            result,
        })
    }
}

impl<'a> ReadPropertyMultipleAck<'a> {
    /// Writes the complete Complex-ACK APDU.
    pub fn encode(&self, w: &mut Writer<'_>, invoke_id: u8) -> Result<(), EncodeError> {
        ComplexAckHeader::new(invoke_id, SERVICE_READ_PROPERTY_MULTIPLE).encode(w)?;
        for access in &self.results {
            encode_ctx_object_id(w, 0, access.object_id.raw())?;
            bracketed(w, 1, |w| {
                access
                    .results
                    .iter()
                    .try_for_each(|element| element.encode(w))
            })?;
        }
        Ok(())
    }

    pub fn decode_after_header(r: &mut Reader<'a>) -> Result<Self, DecodeError> {
        let mut results = Vec::new();
        while !r.is_empty() {
            let object_id = decode_required_ctx_object_id(r, 0)?;
            expect_tag(r, Tag::Opening { tag_num: 1 })?;
            let mut elements = Vec::new();
            while Tag::peek(r)? != (Tag::Closing { tag_num: 1 }) {
                elements.push(ReadResultElement::decode(r)?);
            }
            Tag::decode(r)?;
            results.push(ReadAccessResult {
                object_id,
                results: elements,
            });
        }
        Ok(Self { results })
    }
}
