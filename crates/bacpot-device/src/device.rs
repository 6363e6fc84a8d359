use crate::error::{ConfigError, ReadError};
use crate::object::{select_element, BacnetObject};
use crate::schema::ObjectSchema;
use crate::value::PropertyValue;
use bacpot_core::types::{ObjectId, ObjectType, PropertyId, Segmentation};
use std::borrow::Cow;
use std::collections::HashMap;

const DEFAULT_MAX_APDU: u32 = 1476;

/// The emulated device and the objects it owns.
///
/// Built once at startup and shared read-only afterwards. Object
/// identifiers and names are unique across the device and its objects.
#[derive(Debug, Clone)]
pub struct Device {
    object: BacnetObject,
    objects: Vec<BacnetObject>,
    by_id: HashMap<ObjectId, usize>,
    by_name: HashMap<String, usize>,
}

/// Something a request can address: the device itself or one of its objects.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    Device(&'a Device),
    Object(&'a BacnetObject),
}

impl Device {
    /// Creates a device with every required property at its default.
    pub fn new(instance: u32, name: impl Into<String>) -> Result<Self, ConfigError> {
        if instance >= ObjectId::WILDCARD_INSTANCE {
            return Err(ConfigError::InvalidValue {
                key: "device-identifier".into(),
                reason: format!("instance {instance} is outside 0..4194303"),
            });
        }
        let mut object = BacnetObject::new(ObjectId::new(ObjectType::Device, instance), name)?;
        object.fill_defaults();
        Ok(Self {
            object,
            objects: Vec::new(),
            by_id: HashMap::new(),
            by_name: HashMap::new(),
        })
    }

    pub fn identifier(&self) -> ObjectId {
        self.object.id()
    }

    pub fn instance(&self) -> u32 {
        self.object.id().instance()
    }

    pub fn name(&self) -> &str {
        self.object.name()
    }

    /// The device object's own properties.
    pub fn object(&self) -> &BacnetObject {
        &self.object
    }

    pub(crate) fn object_mut(&mut self) -> &mut BacnetObject {
        &mut self.object
    }

    /// Adds an owned object. Identifier and name must be new to the device.
    pub fn register(&mut self, object: BacnetObject) -> Result<(), ConfigError> {
        if object.id() == self.identifier() || self.by_id.contains_key(&object.id()) {
            return Err(ConfigError::DuplicateIdentifier(object.id()));
        }
        if object.name() == self.name() || self.by_name.contains_key(object.name()) {
            return Err(ConfigError::DuplicateName(object.name().to_string()));
        }
        let slot = self.objects.len();
        self.by_id.insert(object.id(), slot);
        self.by_name.insert(object.name().to_string(), slot);
        log::debug!("registered {} `{}`", object.id(), object.name());
        self.objects.push(object);
        Ok(())
    }

    /// Owned objects in registration order.
    pub fn objects(&self) -> &[BacnetObject] {
        &self.objects
    }

    /// Resolves `id` to the device (directly or through the wildcard
    /// instance) or to an owned object.
    pub fn find_object(&self, id: ObjectId) -> Option<Target<'_>> {
        if id == self.identifier() || id.is_device_wildcard() {
            return Some(Target::Device(self));
        }
        self.by_id
            .get(&id)
            .map(|slot| Target::Object(&self.objects[*slot]))
    }

    /// Owned object called `name`. The device itself is not searched.
    pub fn find_object_by_name(&self, name: &str) -> Option<&BacnetObject> {
        self.by_name.get(name).map(|slot| &self.objects[*slot])
    }

    /// Reads a device property. `object-list` is computed: the device first,
    /// then owned objects in registration order.
    pub fn read_property(
        &self,
        id: PropertyId,
        array_index: Option<u32>,
    ) -> Result<Cow<'_, PropertyValue>, ReadError> {
        if id == PropertyId::ObjectList {
            return select_element(id, Cow::Owned(self.object_list()), array_index);
        }
        self.object.read_property(id, array_index)
    }

    fn object_list(&self) -> PropertyValue {
        let ids = std::iter::once(self.identifier())
            .chain(self.objects.iter().map(BacnetObject::id))
            .map(PropertyValue::ObjectId)
            .collect();
        PropertyValue::Array(ids)
    }

    pub fn max_apdu(&self) -> u32 {
        match self.object.read_property(PropertyId::MaxApduLengthAccepted, None) {
            Ok(value) => match *value {
                PropertyValue::Unsigned(octets) => octets,
                _ => DEFAULT_MAX_APDU,
            },
            Err(_) => DEFAULT_MAX_APDU,
        }
    }

    pub fn segmentation(&self) -> Segmentation {
        match self.object.read_property(PropertyId::SegmentationSupported, None) {
            Ok(value) => match *value {
                PropertyValue::Enumerated(raw) => {
                    Segmentation::from_u32(raw).unwrap_or(Segmentation::NoSegmentation)
                }
                _ => Segmentation::NoSegmentation,
            },
            Err(_) => Segmentation::NoSegmentation,
        }
    }

    pub fn vendor_id(&self) -> u32 {
        match self.object.read_property(PropertyId::VendorIdentifier, None) {
            Ok(value) => match *value {
                PropertyValue::Unsigned(vendor) => vendor,
                _ => 0,
            },
            Err(_) => 0,
        }
    }
}

impl<'a> Target<'a> {
    pub fn id(&self) -> ObjectId {
        match *self {
            Self::Device(device) => device.identifier(),
            Self::Object(object) => object.id(),
        }
    }

    pub fn name(&self) -> &'a str {
        match *self {
            Self::Device(device) => device.name(),
            Self::Object(object) => object.name(),
        }
    }

    pub fn schema(&self) -> &'static ObjectSchema {
        self.object().schema()
    }

    /// The object record behind the target; for the device, its device object.
    pub fn object(&self) -> &'a BacnetObject {
        match *self {
            Self::Device(device) => device.object(),
            Self::Object(object) => object,
        }
    }

    pub fn read_property(
        &self,
        id: PropertyId,
        array_index: Option<u32>,
    ) -> Result<Cow<'a, PropertyValue>, ReadError> {
        match *self {
            Self::Device(device) => device.read_property(id, array_index),
            Self::Object(object) => object.read_property(id, array_index),
        }
    }
}
