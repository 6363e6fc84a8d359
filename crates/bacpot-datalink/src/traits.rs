use crate::DataLinkAddress;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataLinkError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("frame of {0} octets exceeds the B/IP maximum")]
    FrameTooLarge(usize),
}

/// Moves whole BVLL datagrams; framing is the caller's business.
///
/// The server is generic over this so tests can substitute an in-memory
/// link for the UDP socket.
pub trait DataLink: Send + Sync {
    async fn send(&self, address: DataLinkAddress, payload: &[u8]) -> Result<(), DataLinkError>;

    /// Receives one datagram into `buf`, returning its length and sender.
    async fn recv(&self, buf: &mut [u8]) -> Result<(usize, DataLinkAddress), DataLinkError>;
}
