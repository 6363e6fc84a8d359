use super::Indication;
use crate::response::ServiceResponse;
use bacpot_core::services::who_has::{IHaveRequest, WhoHasObject, WhoHasRequest};

/// Answers with I-Have for the first owned object matching the identifier
/// or name. The device object itself is not a candidate.
pub fn handle<'a>(request: &WhoHasRequest<'_>, indication: &Indication<'a>) -> ServiceResponse<'a> {
    let device = indication.device;
    if !request.matches(device.instance()) {
        log::info!(
            "who-has from {} for {:?} does not cover device {}",
            indication.source,
            request.range,
            device.instance()
        );
        return ServiceResponse::NoReply;
    }

    let found = match request.object {
        WhoHasObject::ObjectId(id) => device.objects().iter().find(|object| object.id() == id),
        WhoHasObject::ObjectName(name) => device.find_object_by_name(name),
    };
    let Some(object) = found else {
        log::info!(
            "who-has from {} for {:?}: no such object",
            indication.source,
            request.object
        );
        return ServiceResponse::NoReply;
    };

    log::info!(
        "who-has from {}: answering i-have {} `{}`",
        indication.source,
        object.id(),
        object.name()
    );
    ServiceResponse::IHave(IHaveRequest {
        device_id: device.identifier(),
        object_id: object.id(),
        object_name: object.name(),
    })
}
