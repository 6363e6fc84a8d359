use super::Indication;
use crate::response::ServiceResponse;
use bacpot_core::services::i_am::IAmRequest;
use bacpot_core::services::who_is::WhoIsRequest;

/// Answers with I-Am unless the request's instance range excludes us.
pub fn handle<'a>(request: &WhoIsRequest, indication: &Indication<'a>) -> ServiceResponse<'a> {
    let device = indication.device;
    if !request.matches(device.instance()) {
        log::info!(
            "who-is from {} for {:?} does not cover device {}",
            indication.source,
            request.range,
            device.instance()
        );
        return ServiceResponse::NoReply;
    }
    log::info!("who-is from {}: answering i-am", indication.source);
    ServiceResponse::IAm(IAmRequest {
        device_id: device.identifier(),
        max_apdu: device.max_apdu(),
        segmentation: device.segmentation().to_u32(),
        vendor_id: device.vendor_id(),
    })
}

#[cfg(test)]
mod tests {
    use super::handle;
    use crate::handlers::fixtures::{reference_device, requester};
    use crate::handlers::Indication;
    use crate::response::ServiceResponse;
    use crate::transmit::MAX_APDU_LEN;
    use bacpot_core::services::who_is::WhoIsRequest;
    use bacpot_core::types::{ObjectId, ObjectType, Segmentation};

    #[test]
    fn global_who_is_answers_with_device_parameters() {
        let device = reference_device();
        let indication = Indication {
            device: &device,
            source: requester(),
            invoke_id: None,
            max_apdu: MAX_APDU_LEN,
        };
        let ServiceResponse::IAm(i_am) = handle(&WhoIsRequest::global(), &indication) else {
            panic!("expected i-am");
        };
        assert_eq!(i_am.device_id, ObjectId::new(ObjectType::Device, 36113));
        assert_eq!(i_am.max_apdu, 1024);
        assert_eq!(i_am.segmentation, Segmentation::SegmentedBoth.to_u32());
        assert_eq!(i_am.vendor_id, 15);
    }

    #[test]
    fn range_limits_are_inclusive() {
        let device = reference_device();
        let indication = Indication {
            device: &device,
            source: requester(),
            invoke_id: None,
            max_apdu: MAX_APDU_LEN,
        };
        for (low, high) in [(36113, 36113), (0, 36113), (36113, 4_194_303)] {
            assert!(matches!(
                handle(&WhoIsRequest::ranged(low, high), &indication),
                ServiceResponse::IAm(_)
            ));
        }
    }

    #[test]
    fn range_excluding_device_is_silent() {
        let device = reference_device();
        let indication = Indication {
            device: &device,
            source: requester(),
            invoke_id: None,
            max_apdu: MAX_APDU_LEN,
        };
        assert_eq!(
            handle(&WhoIsRequest::ranged(1, 36112), &indication),
            ServiceResponse::NoReply
        );
        assert_eq!(
            handle(&WhoIsRequest::ranged(36114, 40000), &indication),
            ServiceResponse::NoReply
        );
    }
}
