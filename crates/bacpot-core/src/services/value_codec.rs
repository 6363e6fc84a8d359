use crate::encoding::{
    primitives::{
        decode_character_string, decode_signed, decode_unsigned, encode_app_character_string,
        encode_app_object_id, encode_app_real, encode_app_signed, encode_app_unsigned_like,
    },
    reader::Reader,
    tag::{AppTag, Tag},
    writer::Writer,
};
use crate::types::{BitString, DataValue, ObjectId};
use crate::{DecodeError, EncodeError};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// Encodes a value as application-tagged data. A list becomes its elements
/// written back to back.
pub fn encode_application_data_value(
    w: &mut Writer<'_>,
    value: &DataValue<'_>,
) -> Result<(), EncodeError> {
    let bare = |tag, len| Tag::Application { tag, len };
    match value {
        DataValue::Null => bare(AppTag::Null, 0).encode(w),
        DataValue::Boolean(v) => bare(AppTag::Boolean, u32::from(*v)).encode(w),
        DataValue::Unsigned(v) => encode_app_unsigned_like(w, AppTag::UnsignedInt, *v),
        DataValue::Enumerated(v) => encode_app_unsigned_like(w, AppTag::Enumerated, *v),
        DataValue::Signed(v) => encode_app_signed(w, *v),
        DataValue::Real(v) => encode_app_real(w, *v),
        DataValue::Double(v) => {
            bare(AppTag::Double, 8).encode(w)?;
            w.write_all(&v.to_be_bytes())
        }
        DataValue::CharacterString(v) => encode_app_character_string(w, v),
        DataValue::BitString(bits) => {
            if bits.unused_bits > 7 {
                return Err(EncodeError::ValueOutOfRange);
            }
            let len = u32::try_from(bits.data.len() + 1)
                .map_err(|_| EncodeError::ValueOutOfRange)?;
            bare(AppTag::BitString, len).encode(w)?;
            w.write_u8(bits.unused_bits)?;
            w.write_all(bits.data)
        }
        DataValue::ObjectId(v) => encode_app_object_id(w, v.raw()),
        #[cfg(feature = "alloc")]
        DataValue::List(values) => values
            .iter()
            .try_for_each(|child| encode_application_data_value(w, child)),
    }
}

pub fn decode_application_data_value<'a>(r: &mut Reader<'a>) -> Result<DataValue<'a>, DecodeError> {
    let tag = Tag::decode(r)?;
    decode_application_data_value_from_tag(r, tag)
}

/// Reads a fixed-width body, rejecting any other declared length.
fn fixed<const N: usize>(r: &mut Reader<'_>, len: usize) -> Result<[u8; N], DecodeError> {
    if len != N {
        return Err(DecodeError::InvalidLength);
    }
    let mut out = [0u8; N];
    out.copy_from_slice(r.read_exact(N)?);
    Ok(out)
}

/// Octet strings, dates and times are never produced by this device and
/// decode as `Unsupported`, as do context tags.
pub fn decode_application_data_value_from_tag<'a>(
    r: &mut Reader<'a>,
    tag: Tag,
) -> Result<DataValue<'a>, DecodeError> {
    let Tag::Application { tag, len } = tag else {
        return Err(DecodeError::Unsupported);
    };
    let len = len as usize;
    Ok(match tag {
        AppTag::Null => DataValue::Null,
        AppTag::Boolean => DataValue::Boolean(len != 0),
        AppTag::UnsignedInt => DataValue::Unsigned(decode_unsigned(r, len)?),
        AppTag::Enumerated => DataValue::Enumerated(decode_unsigned(r, len)?),
        AppTag::SignedInt => DataValue::Signed(decode_signed(r, len)?),
        AppTag::Real => DataValue::Real(f32::from_be_bytes(fixed(r, len)?)),
        AppTag::Double => DataValue::Double(f64::from_be_bytes(fixed(r, len)?)),
        AppTag::CharacterString => DataValue::CharacterString(decode_character_string(r, len)?),
        AppTag::BitString => {
            let (&unused_bits, data) = r
                .read_exact(len)?
                .split_first()
                .ok_or(DecodeError::InvalidLength)?;
            if unused_bits > 7 {
                return Err(DecodeError::InvalidValue);
            }
            DataValue::BitString(BitString { unused_bits, data })
        }
        AppTag::ObjectId => {
            DataValue::ObjectId(ObjectId::from_raw(u32::from_be_bytes(fixed(r, len)?)))
        }
        AppTag::OctetString | AppTag::Date | AppTag::Time => {
            return Err(DecodeError::Unsupported)
        }
    })
}

/// Decodes application values up to and including the closing tag
/// `tag_num`. One value comes back as itself, anything else as a list.
pub fn decode_values_until_closing<'a>(
    r: &mut Reader<'a>,
    tag_num: u8,
) -> Result<DataValue<'a>, DecodeError> {
    let first = match Tag::decode(r)? {
        Tag::Closing { tag_num: n } if n == tag_num => return empty_list(),
        tag => decode_application_data_value_from_tag(r, tag)?,
    };
    match Tag::decode(r)? {
        Tag::Closing { tag_num: n } if n == tag_num => Ok(first),
        tag => more_values(r, tag_num, first, tag),
    }
}

#[cfg(feature = "alloc")]
fn empty_list<'a>() -> Result<DataValue<'a>, DecodeError> {
    Ok(DataValue::List(Vec::new()))
}

#[cfg(not(feature = "alloc"))]
fn empty_list<'a>() -> Result<DataValue<'a>, DecodeError> {
    Err(DecodeError::Unsupported)
}

#[cfg(feature = "alloc")]
fn more_values<'a>(
    r: &mut Reader<'a>,
    tag_num: u8,
    first: DataValue<'a>,
    mut tag: Tag,
) -> Result<DataValue<'a>, DecodeError> {
    let mut values = alloc::vec![first];
    loop {
        if tag == (Tag::Closing { tag_num }) {
            return Ok(DataValue::List(values));
        }
        values.push(decode_application_data_value_from_tag(r, tag)?);
        tag = Tag::decode(r)?;
    }
}

#[cfg(not(feature = "alloc"))]
fn more_values<'a>(
    _r: &mut Reader<'a>,
    _tag_num: u8,
    _first: DataValue<'a>,
    _tag: Tag,
) -> Result<DataValue<'a>, DecodeError> {
    Err(DecodeError::Unsupported)
}
