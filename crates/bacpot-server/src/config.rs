use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

/// How I-Am and I-Have answers are addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum IAmAddressing {
    /// Original-Broadcast-NPDU to the configured broadcast address, on the
    /// requester's port. What a stock device does.
    #[default]
    Broadcast,
    /// Original-Unicast-NPDU straight back to the requester.
    Unicast,
}

impl FromStr for IAmAddressing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "broadcast" => Ok(Self::Broadcast),
            "unicast" => Ok(Self::Unicast),
            other => Err(format!("expected `broadcast` or `unicast`, got `{other}`")),
        }
    }
}

impl fmt::Display for IAmAddressing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Broadcast => f.write_str("broadcast"),
            Self::Unicast => f.write_str("unicast"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// Directed or limited broadcast address for I-Am / I-Have.
    pub broadcast: IpAddr,
    pub i_am_addressing: IAmAddressing,
    /// Answer unknown confirmed services with Reject(unrecognized-service)
    /// instead of staying silent.
    pub reject_unrecognized_services: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 47808),
            broadcast: IpAddr::V4(Ipv4Addr::BROADCAST),
            i_am_addressing: IAmAddressing::default(),
            reject_unrecognized_services: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{IAmAddressing, ServerConfig};

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind.port(), 47808);
        assert_eq!(config.i_am_addressing, IAmAddressing::Broadcast);
        assert!(!config.reject_unrecognized_services);
    }

    #[test]
    fn addressing_parses_case_insensitively() {
        assert_eq!("Unicast".parse::<IAmAddressing>(), Ok(IAmAddressing::Unicast));
        assert!("multicast".parse::<IAmAddressing>().is_err());
    }
}
