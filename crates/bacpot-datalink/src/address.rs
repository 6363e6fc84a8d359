use core::fmt;
use std::net::{IpAddr, SocketAddr};

/// Where a datagram came from or is going to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataLinkAddress {
    Ip(SocketAddr),
}

impl DataLinkAddress {
    pub fn as_socket_addr(self) -> SocketAddr {
        match self {
            Self::Ip(addr) => addr,
        }
    }

    pub fn port(self) -> u16 {
        self.as_socket_addr().port()
    }

    /// Same port, different host. Used to aim a broadcast at the
    /// requester's port.
    pub fn with_ip(self, ip: IpAddr) -> Self {
        Self::Ip(SocketAddr::new(ip, self.port()))
    }
}

impl From<SocketAddr> for DataLinkAddress {
    fn from(addr: SocketAddr) -> Self {
        Self::Ip(addr)
    }
}

impl fmt::Display for DataLinkAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ip(addr) => write!(f, "{addr}"),
        }
    }
}
