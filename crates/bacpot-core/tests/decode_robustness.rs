use bacpot_core::apdu::{ConfirmedRequestHeader, UnconfirmedRequestHeader};
use bacpot_core::encoding::reader::Reader;
use bacpot_core::npdu::Npdu;
use bacpot_core::services::read_property::ReadPropertyRequest;
use bacpot_core::services::read_property_multiple::ReadPropertyMultipleRequest;
use bacpot_core::services::value_codec::decode_application_data_value;
use bacpot_core::services::who_has::WhoHasRequest;
use bacpot_core::services::who_is::WhoIsRequest;
use proptest::prelude::*;

proptest! {
    #[test]
    fn npdu_and_headers_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..64)) {
        let mut r = Reader::new(&bytes);
        if Npdu::decode(&mut r).is_ok() {
            let mut confirmed = r;
            let _ = ConfirmedRequestHeader::decode(&mut confirmed);
            let _ = UnconfirmedRequestHeader::decode(&mut r);
        }
    }

    #[test]
    fn service_bodies_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..96)) {
        let _ = WhoIsRequest::decode_after_header(&mut Reader::new(&bytes));
        let _ = WhoHasRequest::decode_after_header(&mut Reader::new(&bytes));
        let _ = ReadPropertyRequest::decode_after_header(&mut Reader::new(&bytes));
        let _ = ReadPropertyMultipleRequest::decode_after_header(&mut Reader::new(&bytes));
        let _ = decode_application_data_value(&mut Reader::new(&bytes));
    }

    #[test]
    fn truncated_read_property_is_an_error(cut in 0usize..7) {
        let full = [0x0C, 0x00, 0x00, 0x00, 0x0E, 0x19, 0x55];
        let mut r = Reader::new(&full[..cut]);
        prop_assert!(ReadPropertyRequest::decode_after_header(&mut r).is_err());
    }
}
