//! One function per emulated service. Handlers only read the device model
//! and return the response; they never touch the network.

pub mod read_property;
pub mod read_property_multiple;
pub mod who_has;
pub mod who_is;

use bacpot_datalink::DataLinkAddress;
use bacpot_device::Device;

/// Context of one received request.
#[derive(Debug, Clone, Copy)]
pub struct Indication<'a> {
    pub device: &'a Device,
    pub source: DataLinkAddress,
    /// Present for confirmed requests.
    pub invoke_id: Option<u8>,
    /// Largest APDU the requester accepts. Unconfirmed requests carry no
    /// limit and get [`MAX_APDU_LEN`](crate::transmit::MAX_APDU_LEN).
    pub max_apdu: usize,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use bacpot_device::{Device, DeviceTemplate};

    /// Device 36113 with `BI 01` (binary-input 12) and `AI 01`
    /// (analog-input 14, present value 68.0).
    pub(crate) fn reference_device() -> Device {
        DeviceTemplate::from_json_str(
            r#"{
                "device": [
                    {"key": "device_identifier", "value": 36113},
                    {"key": "device_name", "value": "bacpot"},
                    {"key": "vendor_identifier", "value": 15},
                    {"key": "max_apdu_length_accepted", "value": 1024},
                    {"key": "segmentation_supported", "value": "segmented-both"}
                ],
                "objects": [
                    {"object_type": "binary-input", "properties": [
                        {"key": "object_identifier", "value": 12},
                        {"key": "object_name", "value": "BI 01"}
                    ]},
                    {"object_type": "analog-input", "properties": [
                        {"key": "object_identifier", "value": 14},
                        {"key": "object_name", "value": "AI 01"},
                        {"key": "present_value", "value": 68.0}
                    ]}
                ]
            }"#,
        )
        .and_then(|template| template.build())
        .expect("reference template")
    }

    pub(crate) fn requester() -> bacpot_datalink::DataLinkAddress {
        "192.0.2.10:47808"
            .parse::<std::net::SocketAddr>()
            .expect("address")
            .into()
    }
}
