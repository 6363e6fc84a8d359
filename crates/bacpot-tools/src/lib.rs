use bacpot_device::Device;
use bacpot_server::IAmAddressing;
use clap::ValueEnum;

/// CLI-friendly mirror of [`IAmAddressing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AddressingArg {
    Broadcast,
    Unicast,
}

impl AddressingArg {
    pub const fn into_addressing(self) -> IAmAddressing {
        match self {
            Self::Broadcast => IAmAddressing::Broadcast,
            Self::Unicast => IAmAddressing::Unicast,
        }
    }
}

/// JSON overview of a loaded device, printed by `bacpot --check`.
pub fn device_summary(device: &Device) -> serde_json::Value {
    let objects: Vec<_> = device
        .objects()
        .iter()
        .map(|object| {
            serde_json::json!({
                "object_identifier": object.id().to_string(),
                "object_name": object.name(),
            })
        })
        .collect();
    serde_json::json!({
        "device_identifier": device.identifier().to_string(),
        "device_name": device.name(),
        "vendor_identifier": device.vendor_id(),
        "max_apdu_length_accepted": device.max_apdu(),
        "segmentation_supported": device.segmentation().to_u32(),
        "objects": objects,
    })
}
