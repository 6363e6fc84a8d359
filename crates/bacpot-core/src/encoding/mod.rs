/// Encode/decode functions for BACnet primitive values.
pub mod primitives;
/// Zero-copy byte reader over a received frame.
pub mod reader;
/// BACnet tag system (application, context, opening/closing).
pub mod tag;
/// Byte writer for encoding frames into a caller-owned buffer.
pub mod writer;
