//! Decoding input that was not produced by the encoder.

mod common;

use std::io::{self, Write};

use binconv::Error;
use common::{PocoComplex, PocoSimple};

#[test]
fn empty_input() {
    for error in [
        binconv::deserialize::<i32>(&[], None).unwrap_err(),
        binconv::deserialize::<String>(&[], None).unwrap_err(),
        binconv::deserialize::<PocoSimple>(&[], None).unwrap_err(),
        binconv::deserialize::<Option<PocoSimple>>(&[], None).unwrap_err(),
    ] {
        assert!(error.is_malformed(), "{error}");
    }
}

#[test]
fn every_truncation_of_a_record_fails() {
    let value = PocoComplex {
        id: 300,
        comment: Some("comment".to_owned()),
        int_list: Some(vec![1, 2, 3]),
        byte_array: Some(vec![9; 4]),
        ..PocoComplex::default()
    };
    let bytes = binconv::serialize(&value, None).unwrap();

    for len in 0..bytes.len() {
        let error =
            binconv::deserialize::<PocoComplex>(&bytes[..len], None).unwrap_err();
        assert!(error.is_malformed(), "truncated at {len}: {error}");
    }
}

#[test]
fn trailing_bytes_are_rejected() {
    let mut bytes = binconv::serialize(&PocoSimple::new(1, None), None).unwrap();
    bytes.push(0);

    let error = binconv::deserialize::<PocoSimple>(&bytes, None).unwrap_err();
    assert!(
        matches!(&error, Error::Malformed { reason } if reason.contains("trailing")),
        "{error}"
    );
}

#[test]
fn overlong_varint() {
    let error = binconv::deserialize::<u64>(&[0x80; 11], None).unwrap_err();
    assert!(error.is_malformed(), "{error}");

    // the tenth byte may only carry the top bit
    let mut bytes = [0xFF; 10];
    bytes[9] = 0x02;
    let error = binconv::deserialize::<u64>(&bytes, None).unwrap_err();
    assert!(error.is_malformed(), "{error}");
}

#[test]
fn invalid_utf8() {
    let error = binconv::deserialize::<String>(&[2, 0xC3, 0x28], None).unwrap_err();
    assert!(error.is_malformed(), "{error}");
}

#[test]
fn invalid_presence_byte() {
    let error =
        binconv::deserialize::<Option<PocoSimple>>(&[2, 1, 0], None).unwrap_err();
    assert!(error.is_malformed(), "{error}");
}

#[test]
fn null_string_for_a_required_member() {
    #[derive(Debug, Default, binconv::Binary)]
    struct Named {
        name: String,
    }

    let bytes = binconv::serialize(&None::<String>, None).unwrap();

    let error = binconv::deserialize::<Named>(&bytes, None).unwrap_err();
    assert!(error.is_malformed(), "{error}");
}

#[test]
fn writer_failures_surface_as_io_errors() {
    struct Full;

    impl Write for Full {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::StorageFull, "no space left"))
        }

        fn flush(&mut self) -> io::Result<()> { Ok(()) }
    }

    let error = binconv::serialize_into(&mut Full, &1i32, None).unwrap_err();
    assert!(
        matches!(&error, Error::Io(source) if source.kind() == io::ErrorKind::StorageFull),
        "{error}"
    );
}
