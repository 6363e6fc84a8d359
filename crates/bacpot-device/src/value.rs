use bacpot_core::types::{BitString, DataValue, ObjectId};

/// An owned property value held by the device model.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Null,
    Boolean(bool),
    Unsigned(u32),
    Signed(i32),
    Real(f32),
    Double(f64),
    CharacterString(String),
    Enumerated(u32),
    ObjectId(ObjectId),
    BitString { unused_bits: u8, data: Vec<u8> },
    /// A BACnetARRAY; elements share one datatype.
    Array(Vec<PropertyValue>),
}

impl PropertyValue {
    /// Packs `bits` most significant bit first, the way BACnet orders them.
    pub fn bit_string(bits: &[bool]) -> Self {
        let mut data = vec![0u8; bits.len().div_ceil(8)];
        for (i, bit) in bits.iter().enumerate() {
            if *bit {
                data[i / 8] |= 0x80 >> (i % 8);
            }
        }
        let unused_bits = (data.len() * 8 - bits.len()) as u8;
        Self::BitString { unused_bits, data }
    }

    pub fn as_array(&self) -> Option<&[PropertyValue]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Borrowed wire view. Strings and bit strings reference the owned data.
    pub fn as_data_value(&self) -> DataValue<'_> {
        match self {
            Self::Null => DataValue::Null,
            Self::Boolean(v) => DataValue::Boolean(*v),
            Self::Unsigned(v) => DataValue::Unsigned(*v),
            Self::Signed(v) => DataValue::Signed(*v),
            Self::Real(v) => DataValue::Real(*v),
            Self::Double(v) => DataValue::Double(*v),
            Self::CharacterString(v) => DataValue::CharacterString(v),
            Self::Enumerated(v) => DataValue::Enumerated(*v),
            Self::ObjectId(v) => DataValue::ObjectId(*v),
            Self::BitString { unused_bits, data } => DataValue::BitString(BitString {
                unused_bits: *unused_bits,
                data,
            }),
            Self::Array(items) => {
                DataValue::List(items.iter().map(PropertyValue::as_data_value).collect())
            }
        }
    }
}
