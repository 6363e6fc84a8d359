use crate::types::{BitString, ObjectId};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// An application-tagged property value as it appears on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue<'a> {
    Null,
    Boolean(bool),
    Unsigned(u32),
    Signed(i32),
    Real(f32),
    Double(f64),
    CharacterString(&'a str),
    BitString(BitString<'a>),
    Enumerated(u32),
    ObjectId(ObjectId),
    /// Consecutive application values, e.g. a whole BACnetARRAY.
    #[cfg(feature = "alloc")]
    List(Vec<DataValue<'a>>),
}
