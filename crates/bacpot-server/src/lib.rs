//! BACnet/IP device emulation: request dispatch, service handlers and the
//! responder loop.
//!
//! A datagram flows through [`Responder::process`]: BVLL and NPDU are
//! unwrapped, [`dispatch`] classifies the APDU and routes requests to a
//! [`handlers`] function, and [`transmit`] frames the resulting
//! [`ServiceResponse`] for the wire. [`BacnetServer`] drives a responder from
//! any [`DataLink`](bacpot_datalink::DataLink).

pub mod config;
pub mod dispatch;
pub mod error;
pub mod handlers;
pub mod response;
pub mod server;
pub mod transmit;

pub use config::{IAmAddressing, ServerConfig};
pub use dispatch::{IndicationState, ServiceRequest};
pub use error::ServerError;
pub use response::ServiceResponse;
pub use server::{BacnetServer, Responder};
pub use transmit::Outgoing;
