use core::fmt;

macro_rules! object_types {
    ($($variant:ident = $value:literal => $name:literal,)+) => {
        /// BACnet object types.
        ///
        /// Standard types from the 2012 revision are named variants; anything
        /// else, including vendor types from 128 upwards, is
        /// [`Other`](Self::Other).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum ObjectType {
            $($variant,)+
            Other(u16),
        }

        impl ObjectType {
            pub const fn to_u16(self) -> u16 {
                match self {
                    $(Self::$variant => $value,)+
                    Self::Other(v) => v,
                }
            }

            pub const fn from_u16(value: u16) -> Self {
                match value {
                    $($value => Self::$variant,)+
                    v => Self::Other(v),
                }
            }

            /// Standard hyphenated name, e.g. `analog-input`.
            pub const fn name(self) -> Option<&'static str> {
                match self {
                    $(Self::$variant => Some($name),)+
                    Self::Other(_) => None,
                }
            }

            /// Looks up a standard type by its hyphenated name.
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

object_types! {
    AnalogInput = 0 => "analog-input",
    AnalogOutput = 1 => "analog-output",
    AnalogValue = 2 => "analog-value",
    BinaryInput = 3 => "binary-input",
    BinaryOutput = 4 => "binary-output",
    BinaryValue = 5 => "binary-value",
    Calendar = 6 => "calendar",
    Command = 7 => "command",
    Device = 8 => "device",
    EventEnrollment = 9 => "event-enrollment",
    File = 10 => "file",
    Group = 11 => "group",
    Loop = 12 => "loop",
    MultiStateInput = 13 => "multi-state-input",
    MultiStateOutput = 14 => "multi-state-output",
    NotificationClass = 15 => "notification-class",
    Program = 16 => "program",
    Schedule = 17 => "schedule",
    Averaging = 18 => "averaging",
    MultiStateValue = 19 => "multi-state-value",
    TrendLog = 20 => "trend-log",
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "object-type-{}", self.to_u16()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ObjectType;

    #[test]
    fn numeric_codes_are_stable() {
        for value in 0u16..=30 {
            assert_eq!(ObjectType::from_u16(value).to_u16(), value);
        }
        assert_eq!(ObjectType::MultiStateValue.to_u16(), 19);
    }

    #[test]
    fn names_resolve() {
        assert_eq!(
            ObjectType::from_name("binary-input"),
            Some(ObjectType::BinaryInput)
        );
        assert_eq!(ObjectType::Device.name(), Some("device"));
        assert_eq!(ObjectType::Other(600).name(), None);
        assert_eq!(ObjectType::from_name("BinaryInput"), None);
    }

    #[test]
    fn unnamed_types_display_their_code() {
        assert_eq!(ObjectType::Other(130).to_string(), "object-type-130");
    }
}
