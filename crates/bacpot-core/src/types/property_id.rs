use core::fmt;

macro_rules! property_ids {
    ($($variant:ident = $value:literal => $name:literal,)+) => {
        /// BACnet property identifiers.
        ///
        /// Standard properties the emulator can serve are named variants;
        /// anything else round-trips through [`Proprietary`](Self::Proprietary).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum PropertyId {
            $($variant,)+
            Proprietary(u32),
        }

        impl PropertyId {
            pub const fn to_u32(self) -> u32 {
                match self {
                    $(Self::$variant => $value,)+
                    Self::Proprietary(v) => v,
                }
            }

            pub const fn from_u32(value: u32) -> Self {
                match value {
                    $($value => Self::$variant,)+
                    v => Self::Proprietary(v),
                }
            }

            /// Standard hyphenated name, e.g. `present-value`.
            pub const fn name(self) -> Option<&'static str> {
                match self {
                    $(Self::$variant => Some($name),)+
                    Self::Proprietary(_) => None,
                }
            }

            /// Looks up a standard property by its hyphenated name.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

property_ids! {
    ActiveText = 4 => "active-text",
    All = 8 => "all",
    ApduTimeout = 11 => "apdu-timeout",
    ApplicationSoftwareVersion = 12 => "application-software-version",
    CovIncrement = 22 => "cov-increment",
    Description = 28 => "description",
    DeviceType = 31 => "device-type",
    EventState = 36 => "event-state",
    FirmwareRevision = 44 => "firmware-revision",
    InactiveText = 46 => "inactive-text",
    Location = 58 => "location",
    MaxApduLengthAccepted = 62 => "max-apdu-length-accepted",
    MaxPresValue = 65 => "max-pres-value",
    MinPresValue = 69 => "min-pres-value",
    ModelName = 70 => "model-name",
    NumberOfApduRetries = 73 => "number-of-apdu-retries",
    NumberOfStates = 74 => "number-of-states",
    ObjectIdentifier = 75 => "object-identifier",
    ObjectList = 76 => "object-list",
    ObjectName = 77 => "object-name",
    ObjectType = 79 => "object-type",
    Optional = 80 => "optional",
    OutOfService = 81 => "out-of-service",
    Polarity = 84 => "polarity",
    PresentValue = 85 => "present-value",
    ProtocolObjectTypesSupported = 96 => "protocol-object-types-supported",
    ProtocolServicesSupported = 97 => "protocol-services-supported",
    ProtocolVersion = 98 => "protocol-version",
    Reliability = 103 => "reliability",
    RelinquishDefault = 104 => "relinquish-default",
    Required = 105 => "required",
    Resolution = 106 => "resolution",
    SegmentationSupported = 107 => "segmentation-supported",
    StateText = 110 => "state-text",
    StatusFlags = 111 => "status-flags",
    SystemStatus = 112 => "system-status",
    Units = 117 => "units",
    VendorIdentifier = 120 => "vendor-identifier",
    VendorName = 121 => "vendor-name",
    ProtocolRevision = 139 => "protocol-revision",
    DatabaseRevision = 155 => "database-revision",
    PropertyList = 371 => "property-list",
}

impl PropertyId {
    /// True for the Read-Property-Multiple selectors `all`, `required` and
    /// `optional`, which name a group of properties rather than one.
    pub const fn is_selector(self) -> bool {
        matches!(self, Self::All | Self::Required | Self::Optional)
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "property-{}", self.to_u32()),
        }
    }
}
