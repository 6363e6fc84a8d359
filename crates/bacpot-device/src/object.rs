use crate::error::{ConfigError, ReadError};
use crate::schema::{self, ObjectSchema};
use crate::value::PropertyValue;
use bacpot_core::types::{ObjectId, PropertyId};
use std::borrow::Cow;
use std::collections::HashMap;

/// One emulated object with its configured property values.
///
/// The identity properties (`object-identifier`, `object-name`,
/// `object-type`, `property-list`) are derived from the object itself and
/// never stored in the property map.
#[derive(Debug, Clone)]
pub struct BacnetObject {
    id: ObjectId,
    name: String,
    schema: &'static ObjectSchema,
    properties: HashMap<PropertyId, PropertyValue>,
}

impl BacnetObject {
    pub fn new(id: ObjectId, name: impl Into<String>) -> Result<Self, ConfigError> {
        let schema = schema::schema_for(id.object_type())
            .ok_or_else(|| ConfigError::UnknownObjectType(id.object_type().to_string()))?;
        Ok(Self {
            id,
            name: name.into(),
            schema,
            properties: HashMap::new(),
        })
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &'static ObjectSchema {
        self.schema
    }

    /// Stores a configured value. The caller has already checked it against
    /// the schema.
    pub(crate) fn insert(&mut self, id: PropertyId, value: PropertyValue) {
        self.properties.insert(id, value);
    }

    /// Builder form of [`insert`](Self::insert) that validates the property
    /// against the schema.
    pub fn with_property(mut self, id: PropertyId, value: PropertyValue) -> Result<Self, ConfigError> {
        if schema::is_computed(id) {
            return Err(ConfigError::ComputedProperty { key: id.to_string() });
        }
        if self.schema.spec(id).is_none() {
            return Err(ConfigError::UnknownProperty {
                object_type: self.id.object_type().to_string(),
                key: id.to_string(),
            });
        }
        self.insert(id, value);
        Ok(self)
    }

    /// Gives every required property that was not configured its default.
    pub fn fill_defaults(&mut self) {
        for spec in self.schema.required() {
            if schema::is_computed(spec.id) {
                continue;
            }
            self.properties
                .entry(spec.id)
                .or_insert_with(|| spec.default_value());
        }
    }

    /// Reads `id`, optionally one element of it.
    ///
    /// Array index 0 is the element count; elements are numbered from 1.
    pub fn read_property(
        &self,
        id: PropertyId,
        array_index: Option<u32>,
    ) -> Result<Cow<'_, PropertyValue>, ReadError> {
        let value = self.whole_value(id)?;
        select_element(id, value, array_index)
    }

    fn whole_value(&self, id: PropertyId) -> Result<Cow<'_, PropertyValue>, ReadError> {
        let value = match id {
            PropertyId::ObjectIdentifier => PropertyValue::ObjectId(self.id),
            PropertyId::ObjectName => PropertyValue::CharacterString(self.name.clone()),
            PropertyId::ObjectType => {
                PropertyValue::Enumerated(u32::from(self.id.object_type().to_u16()))
            }
            PropertyId::PropertyList => self.property_list(),
            _ => {
                return self
                    .properties
                    .get(&id)
                    .map(Cow::Borrowed)
                    .ok_or(ReadError::UnknownProperty(id))
            }
        };
        Ok(Cow::Owned(value))
    }

    fn property_list(&self) -> PropertyValue {
        let ids = self
            .schema
            .properties
            .iter()
            .map(|spec| spec.id)
            .filter(|id| {
                !matches!(
                    id,
                    PropertyId::ObjectIdentifier
                        | PropertyId::ObjectName
                        | PropertyId::ObjectType
                        | PropertyId::PropertyList
                )
            })
            .filter(|id| self.properties.contains_key(id) || schema::is_computed(*id))
            .map(|id| PropertyValue::Enumerated(id.to_u32()))
            .collect();
        PropertyValue::Array(ids)
    }
}

pub(crate) fn select_element(
    id: PropertyId,
    value: Cow<'_, PropertyValue>,
    array_index: Option<u32>,
) -> Result<Cow<'_, PropertyValue>, ReadError> {
    let Some(index) = array_index else {
        return Ok(value);
    };
    let items = value
        .as_array()
        .ok_or(ReadError::PropertyIsNotAnArray(id))?;
    if index == 0 {
        let len = u32::try_from(items.len()).unwrap_or(u32::MAX);
        return Ok(Cow::Owned(PropertyValue::Unsigned(len)));
    }
    let element = usize::try_from(index - 1)
        .ok()
        .and_then(|i| items.get(i))
        .ok_or(ReadError::InvalidArrayIndex {
            property: id,
            index,
        })?;
    Ok(Cow::Owned(element.clone()))
}

#[cfg(test)]
mod tests {
    use super::BacnetObject;
    use crate::error::{ConfigError, ReadError};
    use crate::value::PropertyValue;
    use bacpot_core::types::{ObjectId, ObjectType, PropertyId};

    fn analog_input() -> BacnetObject {
        BacnetObject::new(ObjectId::new(ObjectType::AnalogInput, 14), "AI 01")
            .unwrap()
            .with_property(PropertyId::PresentValue, PropertyValue::Real(68.0))
            .unwrap()
    }

    #[test]
    fn identity_properties_are_computed() {
        let object = analog_input();
        assert_eq!(
            *object.read_property(PropertyId::ObjectName, None).unwrap(),
            PropertyValue::CharacterString("AI 01".into())
        );
        assert_eq!(
            *object.read_property(PropertyId::ObjectType, None).unwrap(),
            PropertyValue::Enumerated(0)
        );
        assert_eq!(
            *object.read_property(PropertyId::ObjectIdentifier, None).unwrap(),
            PropertyValue::ObjectId(ObjectId::new(ObjectType::AnalogInput, 14))
        );
    }

    #[test]
    fn missing_property_is_unknown() {
        let object = analog_input();
        assert_eq!(
            object.read_property(PropertyId::Description, None),
            Err(ReadError::UnknownProperty(PropertyId::Description))
        );
    }

    #[test]
    fn defaults_fill_required_properties_only() {
        let mut object = analog_input();
        object.fill_defaults();
        assert_eq!(
            *object.read_property(PropertyId::Units, None).unwrap(),
            PropertyValue::Enumerated(95)
        );
        assert_eq!(
            *object.read_property(PropertyId::PresentValue, None).unwrap(),
            PropertyValue::Real(68.0)
        );
        assert_eq!(
            object.read_property(PropertyId::Description, None),
            Err(ReadError::UnknownProperty(PropertyId::Description))
        );
    }

    #[test]
    fn property_list_follows_schema_order_without_identity() {
        let mut object = analog_input();
        object.fill_defaults();
        let list = object.read_property(PropertyId::PropertyList, None).unwrap();
        let ids: Vec<_> = list
            .as_array()
            .unwrap()
            .iter()
            .map(|v| match v {
                PropertyValue::Enumerated(id) => PropertyId::from_u32(*id),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(
            ids,
            vec![
                PropertyId::PresentValue,
                PropertyId::StatusFlags,
                PropertyId::EventState,
                PropertyId::OutOfService,
                PropertyId::Units,
            ]
        );
    }

    #[test]
    fn array_index_selects_elements() {
        let mut object = analog_input();
        object.fill_defaults();
        assert_eq!(
            *object.read_property(PropertyId::PropertyList, Some(0)).unwrap(),
            PropertyValue::Unsigned(5)
        );
        assert_eq!(
            *object.read_property(PropertyId::PropertyList, Some(1)).unwrap(),
            PropertyValue::Enumerated(PropertyId::PresentValue.to_u32())
        );
        assert_eq!(
            object.read_property(PropertyId::PropertyList, Some(6)),
            Err(ReadError::InvalidArrayIndex {
                property: PropertyId::PropertyList,
                index: 6
            })
        );
        assert_eq!(
            object.read_property(PropertyId::PresentValue, Some(1)),
            Err(ReadError::PropertyIsNotAnArray(PropertyId::PresentValue))
        );
    }

    #[test]
    fn builder_rejects_foreign_and_computed_properties() {
        let object = BacnetObject::new(ObjectId::new(ObjectType::BinaryInput, 1), "BI").unwrap();
        assert!(matches!(
            object
                .clone()
                .with_property(PropertyId::Units, PropertyValue::Enumerated(62)),
            Err(ConfigError::UnknownProperty { .. })
        ));
        assert!(matches!(
            object.with_property(PropertyId::ObjectName, PropertyValue::Null),
            Err(ConfigError::ComputedProperty { .. })
        ));
    }

    #[test]
    fn unhosted_type_is_rejected() {
        assert!(matches!(
            BacnetObject::new(ObjectId::new(ObjectType::TrendLog, 1), "log"),
            Err(ConfigError::UnknownObjectType(_))
        ));
    }
}
