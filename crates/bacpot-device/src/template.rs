//! JSON device templates.
//!
//! A template is plain data: an ordered list of device property records and
//! a list of object records. Values are typed by the property's schema
//! datatype, not by their JSON syntax, so `"68"` and `68` both load into a
//! real-valued present value.

use crate::device::Device;
use crate::error::ConfigError;
use crate::object::BacnetObject;
use crate::schema::{self, Datatype, ObjectSchema};
use crate::value::PropertyValue;
use bacpot_core::types::{ObjectId, ObjectType, PropertyId};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceTemplate {
    #[serde(default)]
    pub device: Vec<PropertyRecord>,
    #[serde(default)]
    pub objects: Vec<ObjectRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub object_type: String,
    #[serde(default)]
    pub properties: Vec<PropertyRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub key: String,
    pub value: TemplateValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TemplateValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<TemplateValue>),
}

impl PropertyRecord {
    pub fn new(key: impl Into<String>, value: TemplateValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

impl DeviceTemplate {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validates every record against the schema and builds the device.
    pub fn build(&self) -> Result<Device, ConfigError> {
        let identity = Identity::collect(ObjectType::Device, &self.device)?;
        let instance = identity
            .instance
            .ok_or_else(|| ConfigError::MissingIdentifier("device".into()))?;
        let name = identity.name.ok_or(ConfigError::MissingName(ObjectId::new(
            ObjectType::Device,
            instance,
        )))?;

        let mut device = Device::new(instance, name)?;
        apply_records(device.object_mut(), &self.device)?;

        for record in &self.objects {
            device.register(record.build()?)?;
        }
        log::info!(
            "loaded device {} `{}` with {} objects",
            device.identifier(),
            device.name(),
            device.objects().len()
        );
        Ok(device)
    }
}

impl ObjectRecord {
    fn build(&self) -> Result<BacnetObject, ConfigError> {
        let object_type = ObjectType::from_name(&normalize_key(&self.object_type))
            .filter(|object_type| schema::schema_for(*object_type).is_some())
            .ok_or_else(|| ConfigError::UnknownObjectType(self.object_type.clone()))?;
        if object_type == ObjectType::Device {
            return Err(ConfigError::UnknownObjectType(self.object_type.clone()));
        }

        let identity = Identity::collect(object_type, &self.properties)?;
        let instance = identity
            .instance
            .ok_or_else(|| ConfigError::MissingIdentifier(object_type.to_string()))?;
        let id = ObjectId::new(object_type, instance);
        let name = identity.name.ok_or(ConfigError::MissingName(id))?;

        let mut object = BacnetObject::new(id, name)?;
        apply_records(&mut object, &self.properties)?;
        Ok(object)
    }
}

/// Canonical hyphenated form of a template key: `present_value`,
/// `Present Value` and `presentValue` all become `present-value`.
pub fn normalize_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    let mut prev_lower = false;
    for ch in key.trim().chars() {
        if ch == '_' || ch == ' ' || ch == '-' {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            prev_lower = false;
        } else if ch.is_ascii_uppercase() {
            if prev_lower {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
            prev_lower = false;
        } else {
            out.push(ch);
            prev_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        }
    }
    out
}

enum Key {
    Identifier,
    Name,
    Type,
    Property(PropertyId),
}

fn classify(key: &str) -> Option<Key> {
    match normalize_key(key).as_str() {
        "object-identifier" | "device-identifier" => Some(Key::Identifier),
        "object-name" | "device-name" => Some(Key::Name),
        "object-type" => Some(Key::Type),
        other => PropertyId::from_name(other).map(Key::Property),
    }
}

#[derive(Default)]
struct Identity {
    instance: Option<u32>,
    name: Option<String>,
}

impl Identity {
    fn collect(object_type: ObjectType, records: &[PropertyRecord]) -> Result<Self, ConfigError> {
        let mut identity = Self::default();
        for record in records {
            match classify(&record.key) {
                Some(Key::Identifier) => {
                    identity.instance = Some(parse_instance(object_type, record)?);
                }
                Some(Key::Name) => match &record.value {
                    TemplateValue::Text(name) if !name.is_empty() => {
                        identity.name = Some(name.clone());
                    }
                    _ => return Err(invalid(&record.key, "expected a non-empty string")),
                },
                Some(Key::Type) => {
                    let declared = match &record.value {
                        TemplateValue::Text(text) => ObjectType::from_name(&normalize_key(text)),
                        _ => None,
                    };
                    if declared != Some(object_type) {
                        return Err(invalid(&record.key, "does not match the record's type"));
                    }
                }
                Some(Key::Property(_)) | None => {}
            }
        }
        Ok(identity)
    }
}

fn parse_instance(object_type: ObjectType, record: &PropertyRecord) -> Result<u32, ConfigError> {
    let instance = match &record.value {
        TemplateValue::Integer(n) => u32::try_from(*n).ok(),
        TemplateValue::Text(text) => match text.split_once(':') {
            Some((ty, n)) if ObjectType::from_name(&normalize_key(ty)) == Some(object_type) => {
                n.trim().parse().ok()
            }
            Some(_) => None,
            None => text.trim().parse().ok(),
        },
        _ => None,
    };
    instance
        .filter(|n| *n < ObjectId::WILDCARD_INSTANCE)
        .ok_or_else(|| invalid(&record.key, "expected an instance number below 4194303"))
}

fn apply_records(object: &mut BacnetObject, records: &[PropertyRecord]) -> Result<(), ConfigError> {
    let schema = object.schema();
    for record in records {
        let id = match classify(&record.key) {
            Some(Key::Identifier | Key::Name | Key::Type) => continue,
            Some(Key::Property(id)) => id,
            None => return Err(unknown(schema, &record.key)),
        };
        if schema::is_computed(id) {
            return Err(ConfigError::ComputedProperty {
                key: record.key.clone(),
            });
        }
        let spec = schema
            .spec(id)
            .ok_or_else(|| unknown(schema, &record.key))?;
        let value = parse_value(id, spec.datatype, &record.value)
            .map_err(|reason| invalid(&record.key, &reason))?;
        object.insert(id, value);
    }
    object.fill_defaults();
    Ok(())
}

fn parse_value(id: PropertyId, datatype: Datatype, value: &TemplateValue) -> Result<PropertyValue, String> {
    use TemplateValue as T;
    let parsed = match (datatype, value) {
        (Datatype::Boolean, T::Boolean(b)) => Some(PropertyValue::Boolean(*b)),
        (Datatype::Boolean, T::Text(text)) => text.trim().parse().ok().map(PropertyValue::Boolean),
        (Datatype::Unsigned, T::Integer(n)) => u32::try_from(*n).ok().map(PropertyValue::Unsigned),
        (Datatype::Unsigned, T::Text(text)) => text.trim().parse().ok().map(PropertyValue::Unsigned),
        (Datatype::Signed, T::Integer(n)) => i32::try_from(*n).ok().map(PropertyValue::Signed),
        (Datatype::Signed, T::Text(text)) => text.trim().parse().ok().map(PropertyValue::Signed),
        (Datatype::Real, T::Integer(n)) => Some(PropertyValue::Real(*n as f32)),
        (Datatype::Real, T::Float(f)) => Some(PropertyValue::Real(*f as f32)),
        (Datatype::Real, T::Text(text)) => text.trim().parse().ok().map(PropertyValue::Real),
        (Datatype::Double, T::Integer(n)) => Some(PropertyValue::Double(*n as f64)),
        (Datatype::Double, T::Float(f)) => Some(PropertyValue::Double(*f)),
        (Datatype::Double, T::Text(text)) => text.trim().parse().ok().map(PropertyValue::Double),
        (Datatype::CharacterString, T::Text(text)) => {
            Some(PropertyValue::CharacterString(text.clone()))
        }
        (Datatype::Enumerated, T::Integer(n)) => {
            u32::try_from(*n).ok().map(PropertyValue::Enumerated)
        }
        (Datatype::Enumerated, T::Boolean(b)) => Some(PropertyValue::Enumerated(u32::from(*b))),
        (Datatype::Enumerated, T::Text(text)) => {
            let text = text.trim();
            schema::enumeration_value(id, &normalize_key(text))
                .or_else(|| text.parse().ok())
                .map(PropertyValue::Enumerated)
        }
        (Datatype::ObjectId, T::Text(text)) => parse_object_id(text).map(PropertyValue::ObjectId),
        (Datatype::BitString, T::List(items)) => items
            .iter()
            .map(|item| match item {
                T::Boolean(b) => Some(*b),
                T::Integer(0) => Some(false),
                T::Integer(1) => Some(true),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(|bits| PropertyValue::bit_string(&bits)),
        (Datatype::BitString, T::Text(text)) => text
            .trim()
            .chars()
            .map(|ch| match ch {
                '0' => Some(false),
                '1' => Some(true),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()
            .map(|bits| PropertyValue::bit_string(&bits)),
        (Datatype::ArrayOf(inner), T::List(items)) => {
            let elements = items
                .iter()
                .map(|item| parse_value(id, *inner, item))
                .collect::<Result<Vec<_>, _>>()?;
            Some(PropertyValue::Array(elements))
        }
        _ => None,
    };
    parsed.ok_or_else(|| format!("{value:?} is not a valid {datatype:?}"))
}

/// Parses `analog-input:3` (or `analog-input,3`).
fn parse_object_id(text: &str) -> Option<ObjectId> {
    let (ty, instance) = text.split_once(':').or_else(|| text.split_once(','))?;
    let object_type = ObjectType::from_name(&normalize_key(ty))?;
    let instance = instance.trim().parse().ok()?;
    (instance <= ObjectId::WILDCARD_INSTANCE).then(|| ObjectId::new(object_type, instance))
}

fn unknown(schema: &ObjectSchema, key: &str) -> ConfigError {
    ConfigError::UnknownProperty {
        object_type: schema.object_type.to_string(),
        key: key.to_string(),
    }
}

fn invalid(key: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
