#![no_main]

use bacpot_datalink::BvlcFrame;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(frame) = BvlcFrame::decode(data) {
        assert!(frame.npdu.len() <= data.len());
    }
});
