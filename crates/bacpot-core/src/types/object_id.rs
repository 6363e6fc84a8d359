use crate::types::ObjectType;
use core::fmt;

/// A packed BACnet object identifier combining an [`ObjectType`] and a 22-bit
/// instance number into a single `u32`.
///
/// The upper 10 bits encode the object type and the lower 22 bits encode the
/// instance number, matching the BACnet wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectId(u32);

impl ObjectId {
    /// Instance number that addresses "the device receiving this request".
    pub const WILDCARD_INSTANCE: u32 = 0x3F_FFFF;

    /// Creates an `ObjectId` from a type and instance number.
    pub const fn new(object_type: ObjectType, instance: u32) -> Self {
        Self((((object_type.to_u16() as u32) & 0x03FF) << 22) | (instance & 0x3F_FFFF))
    }

    /// Returns the raw packed `u32` representation.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Constructs an `ObjectId` from a pre-packed `u32`.
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Extracts the [`ObjectType`] from the upper 10 bits.
    pub const fn object_type(self) -> ObjectType {
        let t = ((self.0 >> 22) & 0x03FF) as u16;
        ObjectType::from_u16(t)
    }

    /// Extracts the 22-bit instance number.
    pub const fn instance(self) -> u32 {
        self.0 & 0x3F_FFFF
    }

    /// True for `(device, 4194303)`.
    pub fn is_device_wildcard(self) -> bool {
        self.object_type() == ObjectType::Device && self.instance() == Self::WILDCARD_INSTANCE
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.object_type(), self.instance())
    }
}

#[cfg(test)]
mod tests {
    use super::ObjectId;
    use crate::types::ObjectType;

    #[test]
    fn encodes_object_id() {
        let id = ObjectId::new(ObjectType::AnalogInput, 14);
        assert_eq!(id.object_type(), ObjectType::AnalogInput);
        assert_eq!(id.instance(), 14);
        assert_eq!(id.raw(), 14);
    }

    #[test]
    fn device_wildcard() {
        let id = ObjectId::new(ObjectType::Device, ObjectId::WILDCARD_INSTANCE);
        assert!(id.is_device_wildcard());
        assert_eq!(id.raw(), 0x023F_FFFF);
        assert!(!ObjectId::new(ObjectType::AnalogInput, 4_194_303).is_device_wildcard());
    }

    #[cfg(feature = "std")]
    #[test]
    fn displays_type_and_instance() {
        let id = ObjectId::new(ObjectType::BinaryInput, 12);
        assert_eq!(std::format!("{id}"), "binary-input:12");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_as_raw_value() {
        let id = ObjectId::new(ObjectType::Device, 36113);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "33590545");
    }
}
