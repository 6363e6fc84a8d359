//! The emulated BACnet device: a read-only store of objects and their
//! property values, built once from a JSON template.
//!
//! Every object type carries a fixed [`schema`] that decides which
//! properties exist, whether they are required, and which datatype (and so
//! which wire tag) each value uses. Templates are validated against it at
//! load time; nothing is checked lazily at request time.

pub mod device;
pub mod error;
pub mod object;
pub mod schema;
pub mod template;
pub mod value;

pub use device::{Device, Target};
pub use error::{ConfigError, ReadError};
pub use object::BacnetObject;
pub use schema::{Datatype, ObjectSchema, PropertySpec};
pub use template::{DeviceTemplate, ObjectRecord, PropertyRecord, TemplateValue};
pub use value::PropertyValue;
