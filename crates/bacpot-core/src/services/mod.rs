pub mod i_am;
pub mod read_property;
#[cfg(feature = "alloc")]
pub mod read_property_multiple;
pub mod value_codec;
pub mod who_has;
pub mod who_is;

use crate::encoding::{
    primitives::{decode_unsigned, encode_ctx_unsigned},
    reader::Reader,
    tag::Tag,
    writer::Writer,
};
use crate::types::ObjectId;
use crate::{DecodeError, EncodeError};

/// Reads a context tag and returns its length if its number is `expected`.
fn expect_context(r: &mut Reader<'_>, expected: u8) -> Result<usize, DecodeError> {
    match Tag::decode(r)? {
        Tag::Context { tag_num, len } if tag_num == expected => Ok(len as usize),
        _ => Err(DecodeError::InvalidTag),
    }
}

pub(crate) fn decode_required_ctx_unsigned(
    r: &mut Reader<'_>,
    expected_tag_num: u8,
) -> Result<u32, DecodeError> {
    let len = expect_context(r, expected_tag_num)?;
    decode_unsigned(r, len)
}

/// Decodes `[n] Unsigned` only when the next tag is context tag `n`.
pub(crate) fn decode_optional_ctx_unsigned(
    r: &mut Reader<'_>,
    tag_num: u8,
) -> Result<Option<u32>, DecodeError> {
    if r.is_empty() || !Tag::peek(r)?.is_context(tag_num) {
        return Ok(None);
    }
    decode_required_ctx_unsigned(r, tag_num).map(Some)
}

pub(crate) fn decode_required_ctx_object_id(
    r: &mut Reader<'_>,
    expected_tag_num: u8,
) -> Result<ObjectId, DecodeError> {
    match expect_context(r, expected_tag_num)? {
        4 => r.read_be_u32().map(ObjectId::from_raw),
        _ => Err(DecodeError::InvalidLength),
    }
}

/// Consumes the next tag, which must be exactly `expected`.
pub(crate) fn expect_tag(r: &mut Reader<'_>, expected: Tag) -> Result<(), DecodeError> {
    if Tag::decode(r)? == expected {
        Ok(())
    } else {
        Err(DecodeError::InvalidTag)
    }
}

/// Writes `body` between opening and closing tags `tag_num`.
pub(crate) fn bracketed(
    w: &mut Writer<'_>,
    tag_num: u8,
    body: impl FnOnce(&mut Writer<'_>) -> Result<(), EncodeError>,
) -> Result<(), EncodeError> {
    Tag::Opening { tag_num }.encode(w)?;
    body(w)?;
    Tag::Closing { tag_num }.encode(w)
}

/// Device instance range carried by Who-Is and Who-Has.
///
/// Both limits travel together; a request naming only one of them is malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceRange {
    pub low: u32,
    pub high: u32,
}

impl DeviceRange {
    /// Inclusive on both ends.
    pub const fn contains(&self, instance: u32) -> bool {
        self.low <= instance && instance <= self.high
    }

    pub(crate) fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        encode_ctx_unsigned(w, 0, self.low)?;
        encode_ctx_unsigned(w, 1, self.high)
    }

    /// Reads an optional `[0] low, [1] high` pair at the reader position.
    pub(crate) fn decode_optional(r: &mut Reader<'_>) -> Result<Option<Self>, DecodeError> {
        let Some(low) = decode_optional_ctx_unsigned(r, 0)? else {
            return Ok(None);
        };
        let high = decode_required_ctx_unsigned(r, 1)?;
        Ok(Some(Self { low, high }))
    }
}

/// A `None` range means every device matches.
pub fn range_matches(range: Option<DeviceRange>, instance: u32) -> bool {
    range.map_or(true, |range| range.contains(instance))
}
