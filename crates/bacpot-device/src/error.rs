use bacpot_core::types::{ErrorClass, ErrorCode, ObjectId, PropertyId};
use std::path::PathBuf;
use thiserror::Error;

/// A broken template. Always fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid template JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown object type `{0}`")]
    UnknownObjectType(String),
    #[error("{object_type} objects have no property `{key}`")]
    UnknownProperty { object_type: String, key: String },
    #[error("property `{key}` is computed and cannot be configured")]
    ComputedProperty { key: String },
    #[error("bad value for `{key}`: {reason}")]
    InvalidValue { key: String, reason: String },
    #[error("{0} record has no object identifier")]
    MissingIdentifier(String),
    #[error("object {0} has no object name")]
    MissingName(ObjectId),
    #[error("object identifier {0} registered twice")]
    DuplicateIdentifier(ObjectId),
    #[error("object name `{0}` registered twice")]
    DuplicateName(String),
}

/// Why a single property read failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("unknown property {0}")]
    UnknownProperty(PropertyId),
    #[error("property {0} is not an array")]
    PropertyIsNotAnArray(PropertyId),
    #[error("array index {index} out of range for {property}")]
    InvalidArrayIndex { property: PropertyId, index: u32 },
}

impl ReadError {
    pub const fn error_class(&self) -> ErrorClass {
        ErrorClass::Property
    }

    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnknownProperty(_) => ErrorCode::UnknownProperty,
            Self::PropertyIsNotAnArray(_) => ErrorCode::PropertyIsNotAnArray,
            Self::InvalidArrayIndex { .. } => ErrorCode::InvalidArrayIndex,
        }
    }
}
