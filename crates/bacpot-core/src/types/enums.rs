//! Small enumerations carried in PDU headers and error payloads.

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident: $repr:ty {
            $($variant:ident = $value:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub const fn to_u32(self) -> u32 {
                match self {
                    $(Self::$variant => $value,)+
                }
            }

            pub const fn from_u32(value: u32) -> Option<Self> {
                match value {
                    $($value => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// Narrowed to the octet the value travels in.
            pub const fn to_u8(self) -> u8 {
                self.to_u32() as $repr
            }
        }
    };
}

wire_enum! {
    /// Segmentation capability advertised in I-Am.
    Segmentation: u8 {
        SegmentedBoth = 0,
        SegmentedTransmit = 1,
        SegmentedReceive = 2,
        NoSegmentation = 3,
    }
}

wire_enum! {
    /// Maximum APDU length code from the confirmed-request header.
    MaxApdu: u8 {
        UpTo50 = 0,
        UpTo128 = 1,
        UpTo206 = 2,
        UpTo480 = 3,
        UpTo1024 = 4,
        UpTo1476 = 5,
    }
}

wire_enum! {
    ErrorClass: u8 {
        Device = 0,
        Object = 1,
        Property = 2,
        Resources = 3,
        Security = 4,
        Services = 5,
        Vt = 6,
        Communication = 7,
    }
}

wire_enum! {
    /// The subset of error codes a read-only device reports.
    ErrorCode: u8 {
        Other = 0,
        UnknownObject = 31,
        UnknownProperty = 32,
        WriteAccessDenied = 40,
        InvalidArrayIndex = 42,
        PropertyIsNotAnArray = 50,
    }
}

wire_enum! {
    RejectReason: u8 {
        Other = 0,
        BufferOverflow = 1,
        InvalidParameterDataType = 3,
        InvalidTag = 4,
        MissingRequiredParameter = 5,
        UnrecognizedService = 9,
    }
}

impl Segmentation {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "segmented-both" => Self::SegmentedBoth,
            "segmented-transmit" => Self::SegmentedTransmit,
            "segmented-receive" => Self::SegmentedReceive,
            "no-segmentation" => Self::NoSegmentation,
            _ => return None,
        })
    }
}

impl MaxApdu {
    /// Largest APDU in octets this code allows.
    pub const fn octets(self) -> usize {
        match self {
            Self::UpTo50 => 50,
            Self::UpTo128 => 128,
            Self::UpTo206 => 206,
            Self::UpTo480 => 480,
            Self::UpTo1024 => 1024,
            Self::UpTo1476 => 1476,
        }
    }
}
