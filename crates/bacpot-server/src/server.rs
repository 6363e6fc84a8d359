use crate::config::ServerConfig;
use crate::dispatch::dispatch;
use crate::error::ServerError;
use crate::transmit::{self, Outgoing};
use bacpot_core::encoding::reader::Reader;
use bacpot_core::npdu::Npdu;
use bacpot_datalink::bip::bvlc::MAX_BIP_FRAME_LEN;
use bacpot_datalink::{BvlcFrame, DataLink, DataLinkAddress};
use bacpot_device::Device;
use std::sync::Arc;

/// Turns one received datagram into at most one datagram to send.
///
/// Synchronous and free of I/O so it can be driven by any transport, a test
/// or a fuzzer.
#[derive(Debug, Clone)]
pub struct Responder {
    device: Arc<Device>,
    config: ServerConfig,
}

impl Responder {
    pub fn new(device: Arc<Device>, config: ServerConfig) -> Self {
        Self { device, config }
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn process(&self, datagram: &[u8], source: DataLinkAddress) -> Option<Outgoing> {
        let frame = match BvlcFrame::decode(datagram) {
            Ok(frame) => frame,
            Err(err) => {
                log::debug!("dropping datagram from {source}: bvll {err}");
                return None;
            }
        };
        // replies always go to the UDP peer, never to a claimed origin
        if let Some(origin) = frame.origin {
            log::debug!("forwarded npdu from {source} claims origin {origin}");
        }

        let mut r = Reader::new(frame.npdu);
        let npdu = match Npdu::decode(&mut r) {
            Ok(npdu) => npdu,
            Err(err) => {
                log::debug!("dropping datagram from {source}: npdu {err}");
                return None;
            }
        };
        let apdu = r.rest();

        let response = dispatch(&self.device, &self.config, &npdu, apdu, source);
        match transmit::encode(&response, &npdu, source, &self.config) {
            Ok(outgoing) => outgoing,
            Err(err) => {
                log::warn!("failed to encode response for {source}: {err}");
                None
            }
        }
    }
}

/// Receive loop binding a [`Responder`] to a transport.
pub struct BacnetServer<D: DataLink> {
    datalink: D,
    responder: Responder,
}

impl<D: DataLink> BacnetServer<D> {
    pub fn new(datalink: D, responder: Responder) -> Self {
        Self {
            datalink,
            responder,
        }
    }

    pub fn responder(&self) -> &Responder {
        &self.responder
    }

    /// Serves requests until receiving fails. Problems with a single
    /// datagram, including a failed send, are logged and never end the loop.
    pub async fn run(&self) -> Result<(), ServerError> {
        log::info!(
            "serving device {} `{}` with {} objects",
            self.responder.device().identifier(),
            self.responder.device().name(),
            self.responder.device().objects().len()
        );
        let mut buf = [0u8; MAX_BIP_FRAME_LEN];
        loop {
            let (n, source) = self.datalink.recv(&mut buf).await?;
            self.serve_one(&buf[..n], source).await;
        }
    }

    async fn serve_one(&self, datagram: &[u8], source: DataLinkAddress) {
        let Some(outgoing) = self.responder.process(datagram, source) else {
            return;
        };
        if let Err(err) = self
            .datalink
            .send(outgoing.destination, &outgoing.frame)
            .await
        {
            log::warn!("failed to send response to {}: {err}", outgoing.destination);
        }
    }
}
