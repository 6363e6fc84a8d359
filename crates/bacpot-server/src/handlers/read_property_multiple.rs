use super::Indication;
use crate::response::{ElementResult, MultipleAck, ObjectResults, ServiceResponse};
use bacpot_core::services::read_property_multiple::{
    PropertyAccessError, PropertyReference, ReadPropertyMultipleRequest,
};
use bacpot_core::types::{ErrorClass, ErrorCode, PropertyId};
use bacpot_device::{ReadError, Target};

/// Reads every referenced property of every specified object.
///
/// Failures are reported per element; this service never answers with an
/// Error PDU.
pub fn handle<'a>(
    request: &ReadPropertyMultipleRequest,
    indication: &Indication<'a>,
) -> ServiceResponse<'a> {
    let Some(invoke_id) = indication.invoke_id else {
        return ServiceResponse::NoReply;
    };

    let results = request
        .specs
        .iter()
        .map(|spec| match indication.device.find_object(spec.object_id) {
            Some(target) => ObjectResults {
                object_id: target.id(),
                elements: spec
                    .properties
                    .iter()
                    .flat_map(|reference| read_reference(target, *reference))
                    .collect(),
            },
            None => {
                log::info!(
                    "read-property-multiple from {}: unknown object {}",
                    indication.source,
                    spec.object_id
                );
                ObjectResults {
                    object_id: spec.object_id,
                    elements: spec
                        .properties
                        .iter()
                        .map(|reference| ElementResult {
                            property_id: reference.property_id,
                            array_index: reference.array_index,
                            result: Err(PropertyAccessError::new(
                                ErrorClass::Object,
                                ErrorCode::UnknownObject,
                            )),
                        })
                        .collect(),
                }
            }
        })
        .collect();

    ServiceResponse::ReadPropertyMultipleAck(MultipleAck {
        invoke_id,
        max_apdu: indication.max_apdu,
        results,
    })
}

fn read_reference(target: Target<'_>, reference: PropertyReference) -> Vec<ElementResult<'_>> {
    if reference.property_id.is_selector() {
        return read_selector(target, reference.property_id);
    }

    let result = match target.read_property(reference.property_id, reference.array_index) {
        Ok(value) => Ok(value),
        Err(ReadError::UnknownProperty(_)) => return Vec::new(),
        Err(err) => Err(PropertyAccessError::new(err.error_class(), err.error_code())),
    };
    vec![ElementResult {
        property_id: reference.property_id,
        array_index: reference.array_index,
        result,
    }]
}

/// Expands `all`, `required` or `optional` over the object's schema.
/// `property-list` is never part of the expansion, and properties the object
/// does not carry are left out.
fn read_selector(target: Target<'_>, selector: PropertyId) -> Vec<ElementResult<'_>> {
    target
        .schema()
        .properties
        .iter()
        .filter(|spec| spec.id != PropertyId::PropertyList)
        .filter(|spec| match selector {
            PropertyId::Required => spec.required,
            PropertyId::Optional => !spec.required,
            _ => true,
        })
        .filter_map(|spec| {
            let result = match target.read_property(spec.id, None) {
                Ok(value) => Ok(value),
                Err(ReadError::UnknownProperty(_)) => return None,
                Err(err) => Err(PropertyAccessError::new(err.error_class(), err.error_code())),
            };
            Some(ElementResult {
                property_id: spec.id,
                array_index: None,
                result,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::handle;
    use crate::handlers::fixtures::{reference_device, requester};
    use crate::handlers::Indication;
    use crate::response::{MultipleAck, ServiceResponse};
    use crate::transmit::MAX_APDU_LEN;
    use bacpot_core::services::read_property_multiple::{
        PropertyAccessError, PropertyReference, ReadAccessSpecification,
        ReadPropertyMultipleRequest,
    };
    use bacpot_core::types::{ErrorClass, ErrorCode, ObjectId, ObjectType, PropertyId};
    use bacpot_device::{Device, PropertyValue};

    fn run<'a>(device: &'a Device, specs: Vec<ReadAccessSpecification>) -> MultipleAck<'a> {
        let indication = Indication {
            device,
            source: requester(),
            invoke_id: Some(4),
            max_apdu: MAX_APDU_LEN,
        };
        match handle(&ReadPropertyMultipleRequest { specs }, &indication) {
            ServiceResponse::ReadPropertyMultipleAck(ack) => ack,
            other => panic!("unexpected {other:?}"),
        }
    }

    fn spec(object_id: ObjectId, properties: &[PropertyId]) -> ReadAccessSpecification {
        ReadAccessSpecification {
            object_id,
            properties: properties
                .iter()
                .map(|id| PropertyReference::new(*id))
                .collect(),
        }
    }

    #[test]
    fn single_properties_skip_unknown_property() {
        let device = reference_device();
        let ack = run(
            &device,
            vec![spec(
                ObjectId::new(ObjectType::AnalogInput, 14),
                &[PropertyId::PresentValue, PropertyId::Description],
            )],
        );
        assert_eq!(ack.invoke_id, 4);
        let elements = &ack.results[0].elements;
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0].property_id, PropertyId::PresentValue);
        assert_eq!(
            elements[0].result.as_deref(),
            Ok(&PropertyValue::Real(68.0))
        );
    }

    #[test]
    fn unknown_object_marks_every_reference() {
        let device = reference_device();
        let missing = ObjectId::new(ObjectType::AnalogValue, 7);
        let ack = run(
            &device,
            vec![spec(missing, &[PropertyId::PresentValue, PropertyId::Units])],
        );
        assert_eq!(ack.results[0].object_id, missing);
        for element in &ack.results[0].elements {
            assert_eq!(
                element.result,
                Err(PropertyAccessError::new(
                    ErrorClass::Object,
                    ErrorCode::UnknownObject
                ))
            );
        }
    }

    #[test]
    fn all_selector_walks_schema_without_property_list() {
        let device = reference_device();
        let ack = run(
            &device,
            vec![spec(ObjectId::new(ObjectType::AnalogInput, 14), &[PropertyId::All])],
        );
        let ids: Vec<_> = ack.results[0]
            .elements
            .iter()
            .map(|element| element.property_id)
            .collect();
        assert_eq!(
            ids,
            vec![
                PropertyId::ObjectIdentifier,
                PropertyId::ObjectName,
                PropertyId::ObjectType,
                PropertyId::PresentValue,
                PropertyId::StatusFlags,
                PropertyId::EventState,
                PropertyId::OutOfService,
                PropertyId::Units,
            ]
        );
    }

    #[test]
    fn optional_selector_only_reports_configured_properties() {
        let device = reference_device();
        let ack = run(
            &device,
            vec![spec(ObjectId::new(ObjectType::AnalogInput, 14), &[PropertyId::Optional])],
        );
        assert!(ack.results[0].elements.is_empty());
    }

    #[test]
    fn wildcard_device_and_object_list_element() {
        let device = reference_device();
        let ack = run(
            &device,
            vec![ReadAccessSpecification {
                object_id: ObjectId::new(ObjectType::Device, ObjectId::WILDCARD_INSTANCE),
                properties: vec![
                    PropertyReference {
                        property_id: PropertyId::ObjectList,
                        array_index: Some(2),
                    },
                    PropertyReference {
                        property_id: PropertyId::ObjectList,
                        array_index: Some(7),
                    },
                ],
            }],
        );
        assert_eq!(
            ack.results[0].object_id,
            ObjectId::new(ObjectType::Device, 36113)
        );
        let elements = &ack.results[0].elements;
        assert_eq!(
            elements[0].result.as_deref(),
            Ok(&PropertyValue::ObjectId(ObjectId::new(
                ObjectType::BinaryInput,
                12
            )))
        );
        assert_eq!(
            elements[1].result,
            Err(PropertyAccessError::new(
                ErrorClass::Property,
                ErrorCode::InvalidArrayIndex
            ))
        );
    }
}
