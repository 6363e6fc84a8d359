pub mod bit_string;
pub mod data_value;
pub mod enums;
pub mod object_id;
pub mod object_type;
pub mod property_id;

pub use bit_string::BitString;
pub use data_value::DataValue;
pub use enums::{ErrorClass, ErrorCode, MaxApdu, RejectReason, Segmentation};
pub use object_id::ObjectId;
pub use object_type::ObjectType;
pub use property_id::PropertyId;
