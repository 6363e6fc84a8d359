/// Confirmed-service headers, acknowledgements, errors and rejects.
pub mod confirmed;
/// APDU type discriminant.
pub mod pdu;
/// Unconfirmed-service request header.
pub mod unconfirmed;

pub use confirmed::{BacnetError, ComplexAckHeader, ConfirmedRequestHeader, RejectPdu, Segment};
pub use pdu::ApduType;
pub use unconfirmed::UnconfirmedRequestHeader;
