use crate::apdu::UnconfirmedRequestHeader;
use crate::encoding::{
    primitives::{
        decode_app_character_string, decode_app_object_id, decode_character_string,
        encode_app_character_string, encode_app_object_id, encode_ctx_character_string,
        encode_ctx_object_id,
    },
    reader::Reader,
    tag::Tag,
    writer::Writer,
};
use crate::services::{decode_required_ctx_object_id, range_matches, DeviceRange};
use crate::types::ObjectId;
use crate::{DecodeError, EncodeError};

pub const SERVICE_I_HAVE: u8 = 0x01;
pub const SERVICE_WHO_HAS: u8 = 0x07;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhoHasObject<'a> {
    ObjectId(ObjectId),
    ObjectName(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WhoHasRequest<'a> {
    pub range: Option<DeviceRange>,
    pub object: WhoHasObject<'a>,
}

impl<'a> WhoHasRequest<'a> {
    pub const fn for_object_id(object_id: ObjectId) -> Self {
        Self {
            range: None,
            object: WhoHasObject::ObjectId(object_id),
        }
    }

    pub const fn for_object_name(object_name: &'a str) -> Self {
        Self {
            range: None,
            object: WhoHasObject::ObjectName(object_name),
        }
    }

    pub fn matches(&self, instance: u32) -> bool {
        range_matches(self.range, instance)
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        UnconfirmedRequestHeader {
            service_choice: SERVICE_WHO_HAS,
        }
        .encode(w)?;
        if let Some(range) = self.range {
            range.encode(w)?;
        }
        match self.object {
            WhoHasObject::ObjectId(object_id) => encode_ctx_object_id(w, 2, object_id.raw()),
            WhoHasObject::ObjectName(object_name) => encode_ctx_character_string(w, 3, object_name),
        }
    }

    pub fn decode_after_header(r: &mut Reader<'a>) -> Result<Self, DecodeError> {
        let range = DeviceRange::decode_optional(r)?;
        let object = match Tag::peek(r)? {
            Tag::Context { tag_num: 2, .. } => {
                WhoHasObject::ObjectId(decode_required_ctx_object_id(r, 2)?)
            }
            Tag::Context { tag_num: 3, len } => {
                Tag::decode(r)?;
                WhoHasObject::ObjectName(decode_character_string(r, len as usize)?)
            }
            _ => return Err(DecodeError::InvalidTag),
        };
        r.expect_end()?;
        Ok(Self { range, object })
    }
}

/// I-Have answer. All three fields are application tagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IHaveRequest<'a> {
    pub device_id: ObjectId,
    pub object_id: ObjectId,
    pub object_name: &'a str,
}

impl<'a> IHaveRequest<'a> {
    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        UnconfirmedRequestHeader {
            service_choice: SERVICE_I_HAVE,
        }
        .encode(w)?;
        encode_app_object_id(w, self.device_id.raw())?;
        encode_app_object_id(w, self.object_id.raw())?;
        encode_app_character_string(w, self.object_name)
    }

    pub fn decode_after_header(r: &mut Reader<'a>) -> Result<Self, DecodeError> {
        let device_id = ObjectId::from_raw(decode_app_object_id(r)?);
        let object_id = ObjectId::from_raw(decode_app_object_id(r)?);
        let object_name = decode_app_character_string(r)?;
        Ok(Self {
            device_id,
            object_id,
            object_name,
        })
    }
}
