use core::fmt;

/// Failure to serialize into a caller-provided buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeError {
    /// The output buffer ran out before the value was complete.
    BufferTooSmall,
    /// A field does not fit the width the wire format gives it.
    ValueOutOfRange,
    /// A length-prefixed field is inconsistent with its contents.
    InvalidLength,
}

impl EncodeError {
    const fn describe(self) -> &'static str {
        match self {
            Self::BufferTooSmall => "buffer too small",
            Self::ValueOutOfRange => "value out of range",
            Self::InvalidLength => "invalid length",
        }
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {}

/// Failure to interpret bytes received from the network.
///
/// Input is untrusted, so every variant is a normal outcome rather than a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    UnexpectedEof,
    InvalidTag,
    InvalidLength,
    InvalidValue,
    /// Well formed, but outside what this stack handles (segmentation,
    /// non-UTF-8 character sets).
    Unsupported,
    /// Bytes remained after a complete service payload.
    TrailingData,
}

impl DecodeError {
    const fn describe(self) -> &'static str {
        match self {
            Self::UnexpectedEof => "unexpected end of input",
            Self::InvalidTag => "invalid tag",
            Self::InvalidLength => "invalid length",
            Self::InvalidValue => "invalid value",
            Self::Unsupported => "unsupported encoding",
            Self::TrailingData => "trailing data after payload",
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}
