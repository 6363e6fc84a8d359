#![no_main]

use bacpot_datalink::DataLinkAddress;
use bacpot_device::DeviceTemplate;
use bacpot_server::{Responder, ServerConfig};
use libfuzzer_sys::fuzz_target;
use std::sync::{Arc, OnceLock};

const TEMPLATE: &str = include_str!("../../templates/default.json");

fn responder() -> &'static Responder {
    static RESPONDER: OnceLock<Responder> = OnceLock::new();
    RESPONDER.get_or_init(|| {
        let device = DeviceTemplate::from_json_str(TEMPLATE)
            .and_then(|template| template.build())
            .expect("bundled template");
        Responder::new(Arc::new(device), ServerConfig::default())
    })
}

fuzz_target!(|data: &[u8]| {
    let source = DataLinkAddress::Ip("192.0.2.10:47808".parse().expect("addr"));
    if let Some(outgoing) = responder().process(data, source) {
        assert!(outgoing.frame.len() <= bacpot_datalink::bip::bvlc::MAX_BIP_FRAME_LEN);
    }
});
