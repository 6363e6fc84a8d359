use bacpot_core::apdu::{
    ApduType, BacnetError, ComplexAckHeader, ConfirmedRequestHeader, RejectPdu,
    UnconfirmedRequestHeader,
};
use bacpot_core::encoding::reader::Reader;
use bacpot_core::npdu::Npdu;
use bacpot_core::services::{
    i_am::{IAmRequest, SERVICE_I_AM},
    read_property::{ReadPropertyAck, ReadPropertyRequest, SERVICE_READ_PROPERTY},
    read_property_multiple::{ReadPropertyMultipleRequest, SERVICE_READ_PROPERTY_MULTIPLE},
    who_has::{IHaveRequest, WhoHasRequest, SERVICE_I_HAVE, SERVICE_WHO_HAS},
    who_is::{WhoIsRequest, SERVICE_WHO_IS},
};
use std::fs;
use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .canonicalize()
        .expect("workspace root should be resolvable")
}

fn parse_hex_fixture(path: &Path) -> Vec<u8> {
    let content = fs::read_to_string(path).expect("fixture must be readable");
    let mut out = Vec::new();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        for token in trimmed.split_whitespace() {
            let byte = u8::from_str_radix(token, 16)
                .unwrap_or_else(|_| panic!("invalid hex token '{token}' in {}", path.display()));
            out.push(byte);
        }
    }
    out
}

fn fixture_files() -> Vec<PathBuf> {
    let fixture_dir = workspace_root().join("fixtures/golden");
    let mut files = fs::read_dir(&fixture_dir)
        .expect("fixtures directory should exist")
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "hex"))
        .collect::<Vec<_>>();
    files.sort();
    assert!(
        !files.is_empty(),
        "expected at least one corpus fixture in {}",
        fixture_dir.display()
    );
    files
}

#[test]
fn golden_corpus_fixtures_decode_npdu_and_apdu_header() {
    for fixture in fixture_files() {
        let bytes = parse_hex_fixture(&fixture);
        let mut r = Reader::new(&bytes);
        let npdu = Npdu::decode(&mut r).unwrap_or_else(|e| {
            panic!(
                "fixture {} failed NPDU decode with error {e:?}",
                fixture.display()
            )
        });
        assert!(!npdu.is_network_message(), "{}", fixture.display());

        let apdu_type_nibble = r.peek_u8().expect("fixture carries an APDU") >> 4;
        assert!(
            ApduType::from_u8(apdu_type_nibble).is_some(),
            "fixture {} has unknown APDU type nibble 0x{:x}",
            fixture.display(),
            apdu_type_nibble
        );
    }
}

/// Every fixture must decode completely with the codec its header selects.
#[test]
fn golden_corpus_fixtures_decode_service_payloads() {
    for fixture in fixture_files() {
        let bytes = parse_hex_fixture(&fixture);
        let mut r = Reader::new(&bytes);
        Npdu::decode(&mut r).unwrap();
        let name = fixture.display().to_string();

        match ApduType::from_first_octet(r.peek_u8().unwrap()) {
            Some(ApduType::UnconfirmedRequest) => {
                let hdr = UnconfirmedRequestHeader::decode(&mut r).unwrap();
                match hdr.service_choice {
                    SERVICE_WHO_IS => {
                        WhoIsRequest::decode_after_header(&mut r).unwrap();
                    }
                    SERVICE_WHO_HAS => {
                        WhoHasRequest::decode_after_header(&mut r).unwrap();
                    }
                    SERVICE_I_AM => {
                        IAmRequest::decode_after_header(&mut r).unwrap();
                    }
                    SERVICE_I_HAVE => {
                        IHaveRequest::decode_after_header(&mut r).unwrap();
                    }
                    other => panic!("{name}: unexpected unconfirmed service {other}"),
                }
            }
            Some(ApduType::ConfirmedRequest) => {
                let hdr = ConfirmedRequestHeader::decode(&mut r).unwrap();
                match hdr.service_choice {
                    SERVICE_READ_PROPERTY => {
                        ReadPropertyRequest::decode_after_header(&mut r).unwrap();
                    }
                    SERVICE_READ_PROPERTY_MULTIPLE => {
                        ReadPropertyMultipleRequest::decode_after_header(&mut r).unwrap();
                    }
                    other => panic!("{name}: unexpected confirmed service {other}"),
                }
            }
            Some(ApduType::ComplexAck) => {
                ComplexAckHeader::decode(&mut r).unwrap();
                ReadPropertyAck::decode_after_header(&mut r).unwrap();
            }
            Some(ApduType::Error) => {
                BacnetError::decode(&mut r).unwrap();
            }
            Some(ApduType::Reject) => {
                RejectPdu::decode(&mut r).unwrap();
            }
            other => panic!("{name}: unexpected APDU type {other:?}"),
        }
        assert!(r.is_empty(), "{name}: trailing bytes after payload");
    }
}
