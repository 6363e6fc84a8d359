use super::Indication;
use crate::response::{PropertyAck, ServiceResponse};
use bacpot_core::apdu::BacnetError;
use bacpot_core::services::read_property::{ReadPropertyRequest, SERVICE_READ_PROPERTY};
use bacpot_core::types::{ErrorClass, ErrorCode};
use bacpot_device::{ReadError, Target};
use std::borrow::Cow;

/// Reads one property.
///
/// An unknown object is an Error PDU. An unknown property on a known object
/// is acknowledged with the empty value of its datatype, the way the
/// emulated device has always answered scanners.
pub fn handle<'a>(request: &ReadPropertyRequest, indication: &Indication<'a>) -> ServiceResponse<'a> {
    let Some(invoke_id) = indication.invoke_id else {
        return ServiceResponse::NoReply;
    };

    let Some(target) = indication.device.find_object(request.object_id) else {
        log::info!(
            "read-property from {}: unknown object {}",
            indication.source,
            request.object_id
        );
        return ServiceResponse::Error(BacnetError::new(
            invoke_id,
            SERVICE_READ_PROPERTY,
            ErrorClass::Object,
            ErrorCode::UnknownObject,
        ));
    };

    let value = match target.read_property(request.property_id, request.array_index) {
        Ok(value) => value,
        Err(ReadError::UnknownProperty(property)) => {
            log::info!(
                "read-property from {}: {} has no {}, answering empty value",
                indication.source,
                target.id(),
                property
            );
            Cow::Owned(target.schema().empty_value(property))
        }
        Err(err) => {
            log::info!("read-property from {}: {err}", indication.source);
            return ServiceResponse::Error(BacnetError::new(
                invoke_id,
                SERVICE_READ_PROPERTY,
                err.error_class(),
                err.error_code(),
            ));
        }
    };

    log::debug!(
        "read-property from {}: {} {}",
        indication.source,
        target.id(),
        request.property_id
    );
    ServiceResponse::ReadPropertyAck(PropertyAck {
        invoke_id,
        max_apdu: indication.max_apdu,
        object_id: target.id(),
        object_name: match target {
            Target::Device(_) => None,
            Target::Object(object) => Some(object.name()),
        },
        property_id: request.property_id,
        array_index: request.array_index,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::handle;
    use crate::handlers::fixtures::{reference_device, requester};
    use crate::handlers::Indication;
    use crate::response::ServiceResponse;
    use crate::transmit::MAX_APDU_LEN;
    use bacpot_core::apdu::BacnetError;
    use bacpot_core::services::read_property::{ReadPropertyRequest, SERVICE_READ_PROPERTY};
    use bacpot_core::types::{ErrorClass, ErrorCode, ObjectId, ObjectType, PropertyId};
    use bacpot_device::{Device, PropertyValue};

    fn read(
        device: &Device,
        object_id: ObjectId,
        property_id: PropertyId,
        array_index: Option<u32>,
    ) -> ServiceResponse<'_> {
        let indication = Indication {
            device,
            source: requester(),
            invoke_id: Some(101),
            max_apdu: MAX_APDU_LEN,
        };
        handle(
            &ReadPropertyRequest {
                object_id,
                property_id,
                array_index,
            },
            &indication,
        )
    }

    #[test]
    fn present_value_uses_schema_type() {
        let device = reference_device();
        let ServiceResponse::ReadPropertyAck(ack) = read(
            &device,
            ObjectId::new(ObjectType::AnalogInput, 14),
            PropertyId::PresentValue,
            None,
        ) else {
            panic!("expected ack");
        };
        assert_eq!(ack.invoke_id, 101);
        assert_eq!(ack.object_name, Some("AI 01"));
        assert_eq!(*ack.value, PropertyValue::Real(68.0));
    }

    #[test]
    fn wildcard_reads_the_device() {
        let device = reference_device();
        let ServiceResponse::ReadPropertyAck(ack) = read(
            &device,
            ObjectId::new(ObjectType::Device, ObjectId::WILDCARD_INSTANCE),
            PropertyId::ObjectName,
            None,
        ) else {
            panic!("expected ack");
        };
        assert_eq!(ack.object_id, ObjectId::new(ObjectType::Device, 36113));
        assert_eq!(ack.object_name, None);
        assert_eq!(*ack.value, PropertyValue::CharacterString("bacpot".into()));
    }

    #[test]
    fn unknown_object_is_an_error() {
        let device = reference_device();
        assert_eq!(
            read(
                &device,
                ObjectId::new(ObjectType::AnalogInput, 99),
                PropertyId::PresentValue,
                None
            ),
            ServiceResponse::Error(BacnetError::new(
                101,
                SERVICE_READ_PROPERTY,
                ErrorClass::Object,
                ErrorCode::UnknownObject
            ))
        );
    }

    #[test]
    fn unknown_property_gets_typed_empty_value() {
        let device = reference_device();
        let ServiceResponse::ReadPropertyAck(ack) = read(
            &device,
            ObjectId::new(ObjectType::AnalogInput, 14),
            PropertyId::Description,
            None,
        ) else {
            panic!("expected ack");
        };
        assert_eq!(*ack.value, PropertyValue::CharacterString(String::new()));

        let ServiceResponse::ReadPropertyAck(ack) = read(
            &device,
            ObjectId::new(ObjectType::BinaryInput, 12),
            PropertyId::Proprietary(5000),
            None,
        ) else {
            panic!("expected ack");
        };
        assert_eq!(*ack.value, PropertyValue::Null);
    }

    #[test]
    fn bad_array_index_is_a_property_error() {
        let device = reference_device();
        assert_eq!(
            read(
                &device,
                ObjectId::new(ObjectType::Device, 36113),
                PropertyId::ObjectList,
                Some(9)
            ),
            ServiceResponse::Error(BacnetError::new(
                101,
                SERVICE_READ_PROPERTY,
                ErrorClass::Property,
                ErrorCode::InvalidArrayIndex
            ))
        );
        assert_eq!(
            read(
                &device,
                ObjectId::new(ObjectType::AnalogInput, 14),
                PropertyId::PresentValue,
                Some(1)
            ),
            ServiceResponse::Error(BacnetError::new(
                101,
                SERVICE_READ_PROPERTY,
                ErrorClass::Property,
                ErrorCode::PropertyIsNotAnArray
            ))
        );
    }

    #[test]
    fn object_list_length_at_index_zero() {
        let device = reference_device();
        let ServiceResponse::ReadPropertyAck(ack) = read(
            &device,
            ObjectId::new(ObjectType::Device, 36113),
            PropertyId::ObjectList,
            Some(0),
        ) else {
            panic!("expected ack");
        };
        assert_eq!(*ack.value, PropertyValue::Unsigned(3));
        assert_eq!(ack.array_index, Some(0));
    }
}
