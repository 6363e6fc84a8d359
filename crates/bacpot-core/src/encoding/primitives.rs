//! Tagged primitive values. Integers always use the minimal number of
//! octets, strings are always character set 0.

use crate::encoding::{
    reader::Reader,
    tag::{AppTag, Tag},
    writer::Writer,
};
use crate::{DecodeError, EncodeError};

/// BACnet character set 0: ANSI X3.4 / UTF-8.
pub const CHARSET_UTF8: u8 = 0;

/// Big-endian octets of `value` with leading zero octets dropped.
fn unsigned_octets(value: u32) -> ([u8; 4], usize) {
    let bytes = value.to_be_bytes();
    let skip = (value.leading_zeros() / 8).min(3) as usize;
    (bytes, skip)
}

/// Big-endian octets of `value` with redundant sign octets dropped.
fn signed_octets(value: i32) -> ([u8; 4], usize) {
    let bytes = value.to_be_bytes();
    let redundant = if value < 0 {
        value.leading_ones()
    } else {
        value.leading_zeros()
    };
    // keep one sign bit in the first retained octet
    let skip = (redundant.saturating_sub(1) / 8).min(3) as usize;
    (bytes, skip)
}

fn write_tagged(w: &mut Writer<'_>, tag: Tag, body: &[u8]) -> Result<(), EncodeError> {
    tag.encode(w)?;
    w.write_all(body)
}

fn string_len(value: &str) -> Result<u32, EncodeError> {
    u32::try_from(value.len() + 1).map_err(|_| EncodeError::ValueOutOfRange)
}

fn write_string_body(w: &mut Writer<'_>, value: &str) -> Result<(), EncodeError> {
    w.write_u8(CHARSET_UTF8)?;
    w.write_all(value.as_bytes())
}

/// Reads an application tag and returns its length if it is `expected`.
fn expect_app(r: &mut Reader<'_>, expected: AppTag) -> Result<usize, DecodeError> {
    match Tag::decode(r)? {
        Tag::Application { tag, len } if tag == expected => Ok(len as usize),
        _ => Err(DecodeError::InvalidTag),
    }
}

pub fn decode_unsigned(r: &mut Reader<'_>, len: usize) -> Result<u32, DecodeError> {
    if !(1..=4).contains(&len) {
        return Err(DecodeError::InvalidLength);
    }
    Ok(r
        .read_exact(len)?
        .iter()
        .fold(0u32, |acc, &b| (acc << 8) | u32::from(b)))
}

pub fn decode_signed(r: &mut Reader<'_>, len: usize) -> Result<i32, DecodeError> {
    if !(1..=4).contains(&len) {
        return Err(DecodeError::InvalidLength);
    }
    let raw = r.read_exact(len)?;
    let fill = if raw[0] & 0x80 != 0 { 0xFF } else { 0x00 };
    let mut out = [fill; 4];
    out[4 - len..].copy_from_slice(raw);
    Ok(i32::from_be_bytes(out))
}

pub fn encode_app_unsigned(w: &mut Writer<'_>, value: u32) -> Result<(), EncodeError> {
    encode_app_unsigned_like(w, AppTag::UnsignedInt, value)
}

pub fn encode_app_enumerated(w: &mut Writer<'_>, value: u32) -> Result<(), EncodeError> {
    encode_app_unsigned_like(w, AppTag::Enumerated, value)
}

/// Unsigned and enumerated share an encoding and differ only in the tag.
pub(crate) fn encode_app_unsigned_like(
    w: &mut Writer<'_>,
    tag: AppTag,
    value: u32,
) -> Result<(), EncodeError> {
    let (bytes, skip) = unsigned_octets(value);
    let body = &bytes[skip..];
    write_tagged(
        w,
        Tag::Application {
            tag,
            len: body.len() as u32,
        },
        body,
    )
}

pub fn encode_app_signed(w: &mut Writer<'_>, value: i32) -> Result<(), EncodeError> {
    let (bytes, skip) = signed_octets(value);
    let body = &bytes[skip..];
    write_tagged(
        w,
        Tag::Application {
            tag: AppTag::SignedInt,
            len: body.len() as u32,
        },
        body,
    )
}

pub fn encode_app_object_id(w: &mut Writer<'_>, object_id_raw: u32) -> Result<(), EncodeError> {
    let tag = Tag::Application {
        tag: AppTag::ObjectId,
        len: 4,
    };
    write_tagged(w, tag, &object_id_raw.to_be_bytes())
}

pub fn encode_app_real(w: &mut Writer<'_>, value: f32) -> Result<(), EncodeError> {
    let tag = Tag::Application {
        tag: AppTag::Real,
        len: 4,
    };
    write_tagged(w, tag, &value.to_be_bytes())
}

pub fn encode_app_character_string(w: &mut Writer<'_>, value: &str) -> Result<(), EncodeError> {
    Tag::Application {
        tag: AppTag::CharacterString,
        len: string_len(value)?,
    }
    .encode(w)?;
    write_string_body(w, value)
}

pub fn decode_app_unsigned(r: &mut Reader<'_>) -> Result<u32, DecodeError> {
    let len = expect_app(r, AppTag::UnsignedInt)?;
    decode_unsigned(r, len)
}

pub fn decode_app_enumerated(r: &mut Reader<'_>) -> Result<u32, DecodeError> {
    let len = expect_app(r, AppTag::Enumerated)?;
    decode_unsigned(r, len)
}

pub fn decode_app_object_id(r: &mut Reader<'_>) -> Result<u32, DecodeError> {
    match expect_app(r, AppTag::ObjectId)? {
        4 => r.read_be_u32(),
        _ => Err(DecodeError::InvalidLength),
    }
}

pub fn decode_app_character_string<'a>(r: &mut Reader<'a>) -> Result<&'a str, DecodeError> {
    let len = expect_app(r, AppTag::CharacterString)?;
    decode_character_string(r, len)
}

pub fn encode_ctx_unsigned(w: &mut Writer<'_>, tag_num: u8, value: u32) -> Result<(), EncodeError> {
    let (bytes, skip) = unsigned_octets(value);
    let body = &bytes[skip..];
    write_tagged(
        w,
        Tag::Context {
            tag_num,
            len: body.len() as u32,
        },
        body,
    )
}

pub fn encode_ctx_object_id(
    w: &mut Writer<'_>,
    tag_num: u8,
    object_id_raw: u32,
) -> Result<(), EncodeError> {
    write_tagged(
        w,
        Tag::Context { tag_num, len: 4 },
        &object_id_raw.to_be_bytes(),
    )
}

pub fn encode_ctx_character_string(
    w: &mut Writer<'_>,
    tag_num: u8,
    value: &str,
) -> Result<(), EncodeError> {
    Tag::Context {
        tag_num,
        len: string_len(value)?,
    }
    .encode(w)?;
    write_string_body(w, value)
}

/// Decodes the body of a character string whose tag has already been read.
///
/// Only character set 0 is accepted.
pub fn decode_character_string<'a>(
    r: &mut Reader<'a>,
    len: usize,
) -> Result<&'a str, DecodeError> {
    let raw = r.read_exact(len)?;
    match raw.split_first() {
        None => Err(DecodeError::InvalidLength),
        Some((&CHARSET_UTF8, text)) => {
            core::str::from_utf8(text).map_err(|_| DecodeError::InvalidValue)
        }
        Some(_) => Err(DecodeError::Unsupported),
    }
}

#[cfg(test)]
#[cfg(feature = "alloc")]
mod tests {
    use super::{
        decode_app_character_string, decode_app_unsigned, decode_character_string,
        decode_signed, decode_unsigned, encode_app_character_string, encode_app_signed,
        encode_app_unsigned, encode_ctx_character_string,
    };
    use crate::encoding::{reader::Reader, tag::Tag, writer::Writer};
    use crate::DecodeError;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn app_unsigned_roundtrip(v in any::<u32>()) {
            let mut b = [0u8; 16];
            let mut w = Writer::new(&mut b);
            encode_app_unsigned(&mut w, v).unwrap();
            let mut r = Reader::new(w.as_written());
            prop_assert_eq!(decode_app_unsigned(&mut r).unwrap(), v);
        }

        #[test]
        fn app_signed_roundtrip(v in any::<i32>()) {
            let mut b = [0u8; 16];
            let mut w = Writer::new(&mut b);
            encode_app_signed(&mut w, v).unwrap();
            let mut r = Reader::new(w.as_written());
            let len = match Tag::decode(&mut r).unwrap() {
                Tag::Application { len, .. } => len as usize,
                other => panic!("unexpected tag: {other:?}"),
            };
            prop_assert_eq!(decode_signed(&mut r, len).unwrap(), v);
        }

        #[test]
        fn app_string_roundtrip(s in "[ -~]{0,40}") {
            let mut b = [0u8; 64];
            let mut w = Writer::new(&mut b);
            encode_app_character_string(&mut w, &s).unwrap();
            let mut r = Reader::new(w.as_written());
            prop_assert_eq!(decode_app_character_string(&mut r).unwrap(), s.as_str());
        }
    }

    #[test]
    fn minimal_length_integers() {
        let mut b = [0u8; 16];
        let mut w = Writer::new(&mut b);
        encode_app_unsigned(&mut w, 1024).unwrap();
        encode_app_unsigned(&mut w, 0).unwrap();
        encode_app_signed(&mut w, -1).unwrap();
        encode_app_signed(&mut w, 128).unwrap();
        assert_eq!(
            w.as_written(),
            &[0x22, 0x04, 0x00, 0x21, 0x00, 0x31, 0xFF, 0x32, 0x00, 0x80]
        );
    }

    #[test]
    fn ctx_character_string_body() {
        let mut b = [0u8; 32];
        let mut w = Writer::new(&mut b);
        encode_ctx_character_string(&mut w, 3, "BI 01").unwrap();
        let mut r = Reader::new(w.as_written());
        match Tag::decode(&mut r).unwrap() {
            Tag::Context { tag_num: 3, len } => {
                let got = decode_character_string(&mut r, len as usize).unwrap();
                assert_eq!(got, "BI 01");
            }
            other => panic!("unexpected tag: {other:?}"),
        }
    }

    #[test]
    fn non_utf8_charset_is_unsupported() {
        let mut r = Reader::new(&[0x04, 0x00, 0x41]);
        assert_eq!(
            decode_character_string(&mut r, 3).unwrap_err(),
            DecodeError::Unsupported
        );
    }

    #[test]
    fn oversized_integer_length_is_rejected() {
        let mut r = Reader::new(&[0; 8]);
        assert_eq!(
            decode_unsigned(&mut r, 5).unwrap_err(),
            DecodeError::InvalidLength
        );
    }
}
