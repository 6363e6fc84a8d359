use crate::bip::bvlc::MAX_BIP_FRAME_LEN;
use crate::{DataLink, DataLinkAddress, DataLinkError};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::Mutex;

/// BACnet/IP UDP socket.
///
/// Clones share the socket. Sends are serialized so concurrent responders
/// never interleave writes on the wire.
#[derive(Debug, Clone)]
pub struct UdpTransport {
    socket: Arc<UdpSocket>,
    send_lock: Arc<Mutex<()>>,
}

impl UdpTransport {
    pub async fn bind(bind_addr: SocketAddr) -> Result<Self, DataLinkError> {
        let socket = UdpSocket::bind(bind_addr).await?;
        socket.set_broadcast(true)?;
        log::debug!("bound BACnet/IP socket on {}", socket.local_addr()?);
        Ok(Self {
            socket: Arc::new(socket),
            send_lock: Arc::new(Mutex::new(())),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, DataLinkError> {
        self.socket.local_addr().map_err(DataLinkError::Io)
    }
}

impl DataLink for UdpTransport {
    async fn send(&self, address: DataLinkAddress, payload: &[u8]) -> Result<(), DataLinkError> {
        if payload.len() > MAX_BIP_FRAME_LEN {
            return Err(DataLinkError::FrameTooLarge(payload.len()));
        }
        let _guard = self.send_lock.lock().await;
        self.socket
            .send_to(payload, address.as_socket_addr())
            .await?;
        Ok(())
    }

    async fn recv(&self, buf: &mut [u8]) -> Result<(usize, DataLinkAddress), DataLinkError> {
        let (n, src) = self.socket.recv_from(buf).await?;
        Ok((n, DataLinkAddress::Ip(src)))
    }
}
