//! BACnet/IP link layer for bacpot.
//!
//! [`bip::bvlc`] frames and unframes BACnet Virtual Link Layer datagrams,
//! [`bip::transport::UdpTransport`] moves whole UDP payloads, and the
//! [`DataLink`] trait is the seam the server is written against.

#![allow(async_fn_in_trait)]

pub mod address;
pub mod bip;
pub mod traits;

pub use address::DataLinkAddress;
pub use bip::bvlc::{BvlcFrame, BvlcFunction};
pub use bip::transport::UdpTransport;
pub use traits::{DataLink, DataLinkError};
