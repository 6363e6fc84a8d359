use crate::apdu::UnconfirmedRequestHeader;
use crate::encoding::{reader::Reader, writer::Writer};
use crate::services::DeviceRange;
use crate::{DecodeError, EncodeError};

pub const SERVICE_WHO_IS: u8 = 0x08;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WhoIsRequest {
    pub range: Option<DeviceRange>,
}

impl WhoIsRequest {
    pub const fn global() -> Self {
        Self { range: None }
    }

    pub const fn ranged(low: u32, high: u32) -> Self {
        Self {
            range: Some(DeviceRange { low, high }),
        }
    }

    /// True when a device with `instance` should answer.
    pub fn matches(&self, instance: u32) -> bool {
        super::range_matches(self.range, instance)
    }

    pub fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        UnconfirmedRequestHeader {
            service_choice: SERVICE_WHO_IS,
        }
        .encode(w)?;
        if let Some(range) = self.range {
            range.encode(w)?;
        }
        Ok(())
    }

    pub fn decode_after_header(r: &mut Reader<'_>) -> Result<Self, DecodeError> {
        let range = DeviceRange::decode_optional(r)?;
        r.expect_end()?;
        Ok(Self { range })
    }
}
