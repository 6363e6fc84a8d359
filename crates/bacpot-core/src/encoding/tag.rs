use crate::encoding::{reader::Reader, writer::Writer};
use crate::{DecodeError, EncodeError};

/// Application tag numbers (ASHRAE 135 clause 20.2.1.4).
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppTag {
    Null = 0,
    Boolean = 1,
    UnsignedInt = 2,
    SignedInt = 3,
    Real = 4,
    Double = 5,
    OctetString = 6,
    CharacterString = 7,
    BitString = 8,
    Enumerated = 9,
    Date = 10,
    Time = 11,
    ObjectId = 12,
}

impl AppTag {
    const ALL: [Self; 13] = [
        Self::Null,
        Self::Boolean,
        Self::UnsignedInt,
        Self::SignedInt,
        Self::Real,
        Self::Double,
        Self::OctetString,
        Self::CharacterString,
        Self::BitString,
        Self::Enumerated,
        Self::Date,
        Self::Time,
        Self::ObjectId,
    ];

    /// Tags 13-15 are reserved.
    pub fn from_u8(value: u8) -> Result<Self, DecodeError> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(DecodeError::InvalidTag)
    }
}

const CONTEXT_CLASS: u8 = 0b0000_1000;
const EXTENDED_NUMBER: u8 = 0x0F;
const EXTENDED_LENGTH: u8 = 5;
const OPENING: u8 = 6;
const CLOSING: u8 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Application { tag: AppTag, len: u32 },
    Context { tag_num: u8, len: u32 },
    Opening { tag_num: u8 },
    Closing { tag_num: u8 },
}

impl Tag {
    pub fn encode(self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        match self {
            Tag::Application { tag, len } => write_length_tag(w, tag as u8, 0, len),
            Tag::Context { tag_num, len } => write_length_tag(w, tag_num, CONTEXT_CLASS, len),
            Tag::Opening { tag_num } => write_initial(w, tag_num, CONTEXT_CLASS | OPENING),
            Tag::Closing { tag_num } => write_initial(w, tag_num, CONTEXT_CLASS | CLOSING),
        }
    }

    pub fn decode(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let initial = r.read_u8()?;
        let tag_num = match initial >> 4 {
            EXTENDED_NUMBER => r.read_u8()?,
            n => n,
        };
        let lvt = initial & 0x07;

        if initial & CONTEXT_CLASS == 0 {
            return Ok(Tag::Application {
                tag: AppTag::from_u8(tag_num)?,
                len: read_length(r, lvt)?,
            });
        }
        Ok(match lvt {
            OPENING => Tag::Opening { tag_num },
            CLOSING => Tag::Closing { tag_num },
            _ => Tag::Context {
                tag_num,
                len: read_length(r, lvt)?,
            },
        })
    }

    /// Decodes the next tag without consuming it.
    pub fn peek(r: &Reader<'_>) -> Result<Self, DecodeError> {
        let mut lookahead = *r;
        Self::decode(&mut lookahead)
    }

    /// True when this is a context tag with the given number.
    pub fn is_context(&self, expected: u8) -> bool {
        matches!(self, Tag::Context { tag_num, .. } if *tag_num == expected)
    }
}

/// Initial octet, plus the extended tag number octet for numbers above 14.
fn write_initial(w: &mut Writer<'_>, tag_num: u8, low_bits: u8) -> Result<(), EncodeError> {
    if tag_num < EXTENDED_NUMBER {
        w.write_u8((tag_num << 4) | low_bits)
    } else {
        w.write_u8((EXTENDED_NUMBER << 4) | low_bits)?;
        w.write_u8(tag_num)
    }
}

fn write_length_tag(
    w: &mut Writer<'_>,
    tag_num: u8,
    class: u8,
    len: u32,
) -> Result<(), EncodeError> {
    if len < u32::from(EXTENDED_LENGTH) {
        return write_initial(w, tag_num, class | len as u8);
    }
    write_initial(w, tag_num, class | EXTENDED_LENGTH)?;
    match len {
        0..=253 => w.write_u8(len as u8),
        254..=0xFFFF => {
            w.write_u8(254)?;
            w.write_be_u16(len as u16)
        }
        _ => {
            w.write_u8(255)?;
            w.write_be_u32(len)
        }
    }
}

fn read_length(r: &mut Reader<'_>, lvt: u8) -> Result<u32, DecodeError> {
    if lvt < EXTENDED_LENGTH {
        return Ok(u32::from(lvt));
    }
    if lvt > EXTENDED_LENGTH {
        return Err(DecodeError::InvalidLength);
    }
    match r.read_u8()? {
        254 => r.read_be_u16().map(u32::from),
        255 => r.read_be_u32(),
        short => Ok(u32::from(short)),
    }
}

#[cfg(test)]
mod tests {
    use super::{AppTag, Tag};
    use crate::encoding::{reader::Reader, writer::Writer};
    use crate::DecodeError;

    #[test]
    fn context_object_id_tag_bytes() {
        let mut buf = [0u8; 4];
        let mut w = Writer::new(&mut buf);
        Tag::Context { tag_num: 0, len: 4 }.encode(&mut w).unwrap();
        Tag::Opening { tag_num: 3 }.encode(&mut w).unwrap();
        Tag::Closing { tag_num: 3 }.encode(&mut w).unwrap();
        assert_eq!(w.as_written(), &[0x0C, 0x3E, 0x3F]);
    }

    #[test]
    fn extended_length_and_number() {
        let mut buf = [0u8; 16];
        let mut w = Writer::new(&mut buf);
        Tag::Context {
            tag_num: 30,
            len: 300,
        }
        .encode(&mut w)
        .unwrap();

        let mut r = Reader::new(w.as_written());
        assert_eq!(
            Tag::decode(&mut r).unwrap(),
            Tag::Context {
                tag_num: 30,
                len: 300
            }
        );
        assert!(r.is_empty());
    }

    #[test]
    fn peek_does_not_consume() {
        let r = Reader::new(&[0x91, 0x03]);
        let tag = Tag::peek(&r).unwrap();
        assert_eq!(
            tag,
            Tag::Application {
                tag: AppTag::Enumerated,
                len: 1
            }
        );
        assert_eq!(r.position(), 0);
        assert!(!tag.is_context(1));
    }

    #[test]
    fn reserved_application_tag_is_rejected() {
        let mut r = Reader::new(&[0xD1, 0x00]);
        assert_eq!(Tag::decode(&mut r).unwrap_err(), DecodeError::InvalidTag);
    }

    #[test]
    fn truncated_extended_length_is_eof() {
        let mut r = Reader::new(&[0x75, 0xFE, 0x01]);
        assert_eq!(Tag::decode(&mut r).unwrap_err(), DecodeError::UnexpectedEof);
    }
}
