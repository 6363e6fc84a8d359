//! BACnet wire codecs for the bacpot device emulator.
//!
//! `bacpot-core` encodes and decodes the application and network layers of a
//! BACnet/IP exchange: APDU headers, NPDU headers, tagged primitive values,
//! and the service payloads a small BACnet server has to understand
//! (Who-Is, Who-Has, Read-Property, Read-Property-Multiple) and emit
//! (I-Am, I-Have, acknowledgements, Error and Reject PDUs).
//!
//! Decoding works on borrowed input and never panics: every malformed or
//! truncated buffer yields a [`DecodeError`].
//!
//! # Feature flags
//!
//! - **`std`** (default): enables `std::error::Error` implementations.
//! - **`alloc`** (default): enables list-valued properties and the
//!   Read-Property-Multiple codecs.
//! - **`serde`**: derives `Serialize`/`Deserialize` on identifier types.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

/// APDU headers for requests, acknowledgements, errors and rejects.
pub mod apdu;
/// Binary encoding primitives, tag system, and zero-copy reader/writer.
pub mod encoding;
/// Error types for encoding and decoding operations.
pub mod error;
/// NPDU (Network Protocol Data Unit) encoding and decoding.
pub mod npdu;
/// Service request and response codecs.
pub mod services;
/// Object identifiers, property identifiers, enumerations and data values.
pub mod types;

pub use error::{DecodeError, EncodeError};
