//! Fixed per-object-type property tables.
//!
//! The order of each table is the order `all`/`required`/`optional`
//! selectors walk it in, and the order `property-list` reports.

use crate::value::PropertyValue;
use bacpot_core::types::{ObjectType, PropertyId, Segmentation};

/// Declared datatype of a property. Selects the application tag on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Datatype {
    Boolean,
    Unsigned,
    Signed,
    Real,
    Double,
    CharacterString,
    Enumerated,
    ObjectId,
    BitString,
    ArrayOf(&'static Datatype),
}

impl Datatype {
    pub const fn is_array(self) -> bool {
        matches!(self, Self::ArrayOf(_))
    }

    /// Value reported for a property the object does not carry.
    ///
    /// Object identifiers have no neutral value and read as Null.
    pub fn empty_value(self) -> PropertyValue {
        match self {
            Self::Boolean => PropertyValue::Boolean(false),
            Self::Unsigned => PropertyValue::Unsigned(0),
            Self::Signed => PropertyValue::Signed(0),
            Self::Real => PropertyValue::Real(0.0),
            Self::Double => PropertyValue::Double(0.0),
            Self::CharacterString => PropertyValue::CharacterString(String::new()),
            Self::Enumerated => PropertyValue::Enumerated(0),
            Self::ObjectId => PropertyValue::Null,
            Self::BitString => PropertyValue::bit_string(&[]),
            Self::ArrayOf(_) => PropertyValue::Array(Vec::new()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertySpec {
    pub id: PropertyId,
    pub datatype: Datatype,
    pub required: bool,
}

const fn req(id: PropertyId, datatype: Datatype) -> PropertySpec {
    PropertySpec {
        id,
        datatype,
        required: true,
    }
}

const fn opt(id: PropertyId, datatype: Datatype) -> PropertySpec {
    PropertySpec {
        id,
        datatype,
        required: false,
    }
}

impl PropertySpec {
    /// Value a required property gets when the template leaves it out.
    pub fn default_value(&self) -> PropertyValue {
        match self.id {
            PropertyId::StatusFlags => PropertyValue::bit_string(&[false; 4]),
            PropertyId::Units => PropertyValue::Enumerated(NO_UNITS),
            PropertyId::NumberOfStates => PropertyValue::Unsigned(2),
            PropertyId::ProtocolVersion => PropertyValue::Unsigned(1),
            PropertyId::ProtocolRevision => PropertyValue::Unsigned(14),
            PropertyId::MaxApduLengthAccepted => PropertyValue::Unsigned(1476),
            PropertyId::SegmentationSupported => {
                PropertyValue::Enumerated(Segmentation::NoSegmentation.to_u32())
            }
            PropertyId::ApduTimeout => PropertyValue::Unsigned(3000),
            PropertyId::NumberOfApduRetries => PropertyValue::Unsigned(3),
            PropertyId::ProtocolServicesSupported => services_supported(),
            PropertyId::ProtocolObjectTypesSupported => object_types_supported(),
            _ => self.datatype.empty_value(),
        }
    }
}

/// Properties whose value is derived from the model rather than configured.
pub fn is_computed(id: PropertyId) -> bool {
    matches!(
        id,
        PropertyId::ObjectIdentifier
            | PropertyId::ObjectName
            | PropertyId::ObjectType
            | PropertyId::PropertyList
            | PropertyId::ObjectList
    )
}

#[derive(Debug)]
pub struct ObjectSchema {
    pub object_type: ObjectType,
    pub properties: &'static [PropertySpec],
}

impl ObjectSchema {
    pub fn spec(&self, id: PropertyId) -> Option<&'static PropertySpec> {
        self.properties.iter().find(|spec| spec.id == id)
    }

    pub fn required(&self) -> impl Iterator<Item = &'static PropertySpec> {
        self.properties.iter().filter(|spec| spec.required)
    }

    /// Placeholder reported when a read names a property the object lacks.
    /// Falls back to the property's datatype in any schema, then to Null.
    pub fn empty_value(&self, id: PropertyId) -> PropertyValue {
        self.spec(id)
            .map(|spec| spec.datatype)
            .or_else(|| datatype_of(id))
            .map_or(PropertyValue::Null, Datatype::empty_value)
    }
}

/// Schema for `object_type`, or `None` when the emulator cannot host it.
pub fn schema_for(object_type: ObjectType) -> Option<&'static ObjectSchema> {
    SCHEMAS.iter().find(|schema| schema.object_type == object_type)
}

/// Datatype of `id` in any schema. Used for properties an object does not
/// declare itself.
pub fn datatype_of(id: PropertyId) -> Option<Datatype> {
    SCHEMAS
        .iter()
        .find_map(|schema| schema.spec(id))
        .map(|spec| spec.datatype)
}

/// Resolves a symbolic enumeration value such as `active` or
/// `degrees-celsius` for an enumerated property.
pub fn enumeration_value(id: PropertyId, name: &str) -> Option<u32> {
    let table: &[(&str, u32)] = match id {
        PropertyId::SegmentationSupported => {
            return Segmentation::from_name(name).map(Segmentation::to_u32)
        }
        PropertyId::PresentValue | PropertyId::RelinquishDefault => BINARY_PV,
        PropertyId::EventState => EVENT_STATE,
        PropertyId::Reliability => RELIABILITY,
        PropertyId::Polarity => POLARITY,
        PropertyId::SystemStatus => SYSTEM_STATUS,
        PropertyId::Units => ENGINEERING_UNITS,
        _ => return None,
    };
    table
        .iter()
        .find(|(entry, _)| *entry == name)
        .map(|(_, value)| *value)
}

const NO_UNITS: u32 = 95;

const BINARY_PV: &[(&str, u32)] = &[("inactive", 0), ("active", 1)];

const EVENT_STATE: &[(&str, u32)] = &[
    ("normal", 0),
    ("fault", 1),
    ("offnormal", 2),
    ("high-limit", 3),
    ("low-limit", 4),
];

const RELIABILITY: &[(&str, u32)] = &[
    ("no-fault-detected", 0),
    ("no-sensor", 1),
    ("over-range", 2),
    ("under-range", 3),
    ("open-loop", 4),
    ("shorted-loop", 5),
    ("no-output", 6),
    ("unreliable-other", 7),
];

const POLARITY: &[(&str, u32)] = &[("normal", 0), ("reverse", 1)];

const SYSTEM_STATUS: &[(&str, u32)] = &[
    ("operational", 0),
    ("operational-read-only", 1),
    ("download-required", 2),
    ("download-in-progress", 3),
    ("non-operational", 4),
    ("backup-in-progress", 5),
];

const ENGINEERING_UNITS: &[(&str, u32)] = &[
    ("square-meters", 0),
    ("milliamperes", 2),
    ("amperes", 3),
    ("volts", 5),
    ("kilovolts", 6),
    ("hertz", 27),
    ("percent-relative-humidity", 29),
    ("watts", 47),
    ("kilowatts", 48),
    ("pascals", 53),
    ("kilopascals", 54),
    ("bars", 55),
    ("degrees-celsius", 62),
    ("degrees-kelvin", 63),
    ("degrees-fahrenheit", 64),
    ("hours", 71),
    ("minutes", 72),
    ("seconds", 73),
    ("liters-per-second", 87),
    ("no-units", NO_UNITS),
    ("percent", 98),
    ("revolutions-per-minute", 104),
    ("cubic-meters-per-hour", 135),
];

/// Services this emulator executes: read-property (12),
/// read-property-multiple (14), who-has (33) and who-is (34).
fn services_supported() -> PropertyValue {
    let mut bits = [false; 49];
    for service in [12, 14, 33, 34] {
        bits[service] = true;
    }
    PropertyValue::bit_string(&bits)
}

fn object_types_supported() -> PropertyValue {
    let mut bits = [false; 60];
    for schema in SCHEMAS {
        bits[usize::from(schema.object_type.to_u16())] = true;
    }
    PropertyValue::bit_string(&bits)
}

use Datatype::*;
use PropertyId as P;

const DEVICE: &[PropertySpec] = &[
    req(P::ObjectIdentifier, ObjectId),
    req(P::ObjectName, CharacterString),
    req(P::ObjectType, Enumerated),
    req(P::SystemStatus, Enumerated),
    req(P::VendorName, CharacterString),
    req(P::VendorIdentifier, Unsigned),
    req(P::ModelName, CharacterString),
    req(P::FirmwareRevision, CharacterString),
    req(P::ApplicationSoftwareVersion, CharacterString),
    opt(P::Location, CharacterString),
    opt(P::Description, CharacterString),
    req(P::ProtocolVersion, Unsigned),
    req(P::ProtocolRevision, Unsigned),
    req(P::ProtocolServicesSupported, BitString),
    req(P::ProtocolObjectTypesSupported, BitString),
    req(P::ObjectList, ArrayOf(&ObjectId)),
    req(P::MaxApduLengthAccepted, Unsigned),
    req(P::SegmentationSupported, Enumerated),
    req(P::ApduTimeout, Unsigned),
    req(P::NumberOfApduRetries, Unsigned),
    req(P::DatabaseRevision, Unsigned),
    req(P::PropertyList, ArrayOf(&Enumerated)),
];

const ANALOG_INPUT: &[PropertySpec] = &[
    req(P::ObjectIdentifier, ObjectId),
    req(P::ObjectName, CharacterString),
    req(P::ObjectType, Enumerated),
    req(P::PresentValue, Real),
    opt(P::Description, CharacterString),
    opt(P::DeviceType, CharacterString),
    req(P::StatusFlags, BitString),
    req(P::EventState, Enumerated),
    opt(P::Reliability, Enumerated),
    req(P::OutOfService, Boolean),
    req(P::Units, Enumerated),
    opt(P::MinPresValue, Real),
    opt(P::MaxPresValue, Real),
    opt(P::Resolution, Real),
    opt(P::CovIncrement, Real),
    req(P::PropertyList, ArrayOf(&Enumerated)),
];

const ANALOG_OUTPUT: &[PropertySpec] = &[
    req(P::ObjectIdentifier, ObjectId),
    req(P::ObjectName, CharacterString),
    req(P::ObjectType, Enumerated),
    req(P::PresentValue, Real),
    opt(P::Description, CharacterString),
    opt(P::DeviceType, CharacterString),
    req(P::StatusFlags, BitString),
    req(P::EventState, Enumerated),
    opt(P::Reliability, Enumerated),
    req(P::OutOfService, Boolean),
    req(P::Units, Enumerated),
    opt(P::MinPresValue, Real),
    opt(P::MaxPresValue, Real),
    opt(P::Resolution, Real),
    req(P::RelinquishDefault, Real),
    opt(P::CovIncrement, Real),
    req(P::PropertyList, ArrayOf(&Enumerated)),
];

const ANALOG_VALUE: &[PropertySpec] = &[
    req(P::ObjectIdentifier, ObjectId),
    req(P::ObjectName, CharacterString),
    req(P::ObjectType, Enumerated),
    req(P::PresentValue, Real),
    opt(P::Description, CharacterString),
    req(P::StatusFlags, BitString),
    req(P::EventState, Enumerated),
    opt(P::Reliability, Enumerated),
    req(P::OutOfService, Boolean),
    req(P::Units, Enumerated),
    opt(P::RelinquishDefault, Real),
    opt(P::CovIncrement, Real),
    req(P::PropertyList, ArrayOf(&Enumerated)),
];

const BINARY_INPUT: &[PropertySpec] = &[
    req(P::ObjectIdentifier, ObjectId),
    req(P::ObjectName, CharacterString),
    req(P::ObjectType, Enumerated),
    req(P::PresentValue, Enumerated),
    opt(P::Description, CharacterString),
    opt(P::DeviceType, CharacterString),
    req(P::StatusFlags, BitString),
    req(P::EventState, Enumerated),
    opt(P::Reliability, Enumerated),
    req(P::OutOfService, Boolean),
    req(P::Polarity, Enumerated),
    opt(P::InactiveText, CharacterString),
    opt(P::ActiveText, CharacterString),
    req(P::PropertyList, ArrayOf(&Enumerated)),
];

const BINARY_OUTPUT: &[PropertySpec] = &[
    req(P::ObjectIdentifier, ObjectId),
    req(P::ObjectName, CharacterString),
    req(P::ObjectType, Enumerated),
    req(P::PresentValue, Enumerated),
    opt(P::Description, CharacterString),
    opt(P::DeviceType, CharacterString),
    req(P::StatusFlags, BitString),
    req(P::EventState, Enumerated),
    opt(P::Reliability, Enumerated),
    req(P::OutOfService, Boolean),
    req(P::Polarity, Enumerated),
    opt(P::InactiveText, CharacterString),
    opt(P::ActiveText, CharacterString),
    req(P::RelinquishDefault, Enumerated),
    req(P::PropertyList, ArrayOf(&Enumerated)),
];

const BINARY_VALUE: &[PropertySpec] = &[
    req(P::ObjectIdentifier, ObjectId),
    req(P::ObjectName, CharacterString),
    req(P::ObjectType, Enumerated),
    req(P::PresentValue, Enumerated),
    opt(P::Description, CharacterString),
    req(P::StatusFlags, BitString),
    req(P::EventState, Enumerated),
    opt(P::Reliability, Enumerated),
    req(P::OutOfService, Boolean),
    opt(P::InactiveText, CharacterString),
    opt(P::ActiveText, CharacterString),
    opt(P::RelinquishDefault, Enumerated),
    req(P::PropertyList, ArrayOf(&Enumerated)),
];

const MULTI_STATE_INPUT: &[PropertySpec] = &[
    req(P::ObjectIdentifier, ObjectId),
    req(P::ObjectName, CharacterString),
    req(P::ObjectType, Enumerated),
    req(P::PresentValue, Unsigned),
    opt(P::Description, CharacterString),
    opt(P::DeviceType, CharacterString),
    req(P::StatusFlags, BitString),
    req(P::EventState, Enumerated),
    opt(P::Reliability, Enumerated),
    req(P::OutOfService, Boolean),
    req(P::NumberOfStates, Unsigned),
    opt(P::StateText, ArrayOf(&CharacterString)),
    req(P::PropertyList, ArrayOf(&Enumerated)),
];

const MULTI_STATE_OUTPUT: &[PropertySpec] = &[
    req(P::ObjectIdentifier, ObjectId),
    req(P::ObjectName, CharacterString),
    req(P::ObjectType, Enumerated),
    req(P::PresentValue, Unsigned),
    opt(P::Description, CharacterString),
    opt(P::DeviceType, CharacterString),
    req(P::StatusFlags, BitString),
    req(P::EventState, Enumerated),
    opt(P::Reliability, Enumerated),
    req(P::OutOfService, Boolean),
    req(P::NumberOfStates, Unsigned),
    opt(P::StateText, ArrayOf(&CharacterString)),
    req(P::RelinquishDefault, Unsigned),
    req(P::PropertyList, ArrayOf(&Enumerated)),
];

const MULTI_STATE_VALUE: &[PropertySpec] = &[
    req(P::ObjectIdentifier, ObjectId),
    req(P::ObjectName, CharacterString),
    req(P::ObjectType, Enumerated),
    req(P::PresentValue, Unsigned),
    opt(P::Description, CharacterString),
    req(P::StatusFlags, BitString),
    req(P::EventState, Enumerated),
    opt(P::Reliability, Enumerated),
    req(P::OutOfService, Boolean),
    req(P::NumberOfStates, Unsigned),
    opt(P::StateText, ArrayOf(&CharacterString)),
    opt(P::RelinquishDefault, Unsigned),
    req(P::PropertyList, ArrayOf(&Enumerated)),
];

static SCHEMAS: &[ObjectSchema] = &[
    ObjectSchema {
        object_type: ObjectType::Device,
        properties: DEVICE,
    },
    ObjectSchema {
        object_type: ObjectType::AnalogInput,
        properties: ANALOG_INPUT,
    },
    ObjectSchema {
        object_type: ObjectType::AnalogOutput,
        properties: ANALOG_OUTPUT,
    },
    ObjectSchema {
        object_type: ObjectType::AnalogValue,
        properties: ANALOG_VALUE,
    },
    ObjectSchema {
        object_type: ObjectType::BinaryInput,
        properties: BINARY_INPUT,
    },
    ObjectSchema {
        object_type: ObjectType::BinaryOutput,
        properties: BINARY_OUTPUT,
    },
    ObjectSchema {
        object_type: ObjectType::BinaryValue,
        properties: BINARY_VALUE,
    },
    ObjectSchema {
        object_type: ObjectType::MultiStateInput,
        properties: MULTI_STATE_INPUT,
    },
    ObjectSchema {
        object_type: ObjectType::MultiStateOutput,
        properties: MULTI_STATE_OUTPUT,
    },
    ObjectSchema {
        object_type: ObjectType::MultiStateValue,
        properties: MULTI_STATE_VALUE,
    },
];
