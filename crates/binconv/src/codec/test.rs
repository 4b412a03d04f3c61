use proptest::prelude::*;

use super::*;

fn written(f: impl FnOnce(&mut BinaryWriter<'_>) -> Result<()>) -> Vec<u8> {
    let mut buffer = Vec::new();
    f(&mut BinaryWriter::new(&mut buffer)).unwrap();
    buffer
}

#[test]
fn varint_u64_known_encodings() {
    assert_eq!(written(|w| w.write_varint_u64(0)), [0x00]);
    assert_eq!(written(|w| w.write_varint_u64(127)), [0x7F]);
    assert_eq!(written(|w| w.write_varint_u64(128)), [0x80, 0x01]);
    assert_eq!(written(|w| w.write_varint_u64(300)), [0xAC, 0x02]);
    assert_eq!(written(|w| w.write_varint_u64(u64::MAX)).len(), 10);
}

#[test]
fn negative_varint_takes_ten_bytes() {
    let bytes = written(|w| w.write_varint_i64(-1));
    assert_eq!(bytes.len(), MAX_VARINT_BYTES);
    assert_eq!(bytes[9], 0x01);

    let mut input = &bytes[..];
    assert_eq!(BinaryReader::new(&mut input).read_varint_i64().unwrap(), -1);
}

#[test]
fn small_non_negative_varint_is_compact() {
    assert_eq!(written(|w| w.write_varint_i64(0)).len(), 1);
    assert_eq!(written(|w| w.write_varint_i64(127)).len(), 1);
    assert_eq!(written(|w| w.write_varint_i64(128)).len(), 2);
}

#[test]
fn over_long_varint_is_malformed() {
    let bytes = [0xFF; 11];
    let mut input = &bytes[..];
    let error = BinaryReader::new(&mut input).read_varint_u64().unwrap_err();
    assert!(error.is_malformed());

    // ten bytes, but the last one overflows 64 bits
    let mut bytes = [0xFF; 10];
    bytes[9] = 0x02;
    let mut input = &bytes[..];
    let error = BinaryReader::new(&mut input).read_varint_u64().unwrap_err();
    assert!(error.is_malformed());
}

#[test]
fn truncated_varint_is_malformed() {
    let bytes = [0x80, 0x80];
    let mut input = &bytes[..];
    let error = BinaryReader::new(&mut input).read_varint_u64().unwrap_err();
    assert!(error.is_malformed(), "{error}");
}

#[test]
fn boolean_rejects_other_bytes() {
    let bytes = [0, 1, 2];
    let mut input = &bytes[..];
    let mut reader = BinaryReader::new(&mut input);

    assert!(!reader.read_bool().unwrap());
    assert!(reader.read_bool().unwrap());
    assert!(reader.read_bool().unwrap_err().is_malformed());
}

#[test]
#[allow(clippy::float_cmp)]
fn floats_are_little_endian() {
    let bytes = written(|w| w.write_f32(1.0));
    assert_eq!(bytes, 1.0f32.to_le_bytes());

    let bytes = written(|w| w.write_f64(-2.5));
    assert_eq!(bytes.len(), 8);
    let mut input = &bytes[..];
    assert_eq!(BinaryReader::new(&mut input).read_f64().unwrap(), -2.5);
}

#[test]
fn null_and_empty_lengths_differ() {
    let null = written(|w| w.write_length(None));
    let empty = written(|w| w.write_length(Some(0)));
    assert_ne!(null, empty);
    assert_eq!(empty, [0]);

    let mut input = &null[..];
    assert_eq!(BinaryReader::new(&mut input).read_length().unwrap(), None);
    let mut input = &empty[..];
    assert_eq!(BinaryReader::new(&mut input).read_length().unwrap(), Some(0));
}

#[test]
fn negative_length_other_than_null_is_malformed() {
    let bytes = written(|w| w.write_varint_i64(-2));
    let mut input = &bytes[..];
    let error = BinaryReader::new(&mut input).read_length().unwrap_err();
    assert!(error.is_malformed());
}

#[test]
fn block_roundtrip() {
    let bytes = written(|w| w.write_block(Some(b"hello")));
    assert_eq!(bytes.len(), 6);

    let mut input = &bytes[..];
    let block = BinaryReader::new(&mut input).read_block().unwrap();
    assert_eq!(block.as_deref(), Some(&b"hello"[..]));
    assert!(input.is_empty());

    let bytes = written(|w| w.write_block(None));
    let mut input = &bytes[..];
    assert_eq!(BinaryReader::new(&mut input).read_block().unwrap(), None);
}

#[test]
fn block_longer_than_input_is_malformed() {
    let mut bytes = written(|w| w.write_length(Some(1_000_000)));
    bytes.extend_from_slice(b"abc");

    let mut input = &bytes[..];
    let error = BinaryReader::new(&mut input).read_block().unwrap_err();
    assert!(error.is_malformed());
}

#[test]
fn preallocation_is_capped() {
    assert_eq!(preallocation(3), 3);
    assert_eq!(preallocation(usize::MAX), MAX_PREALLOCATION);
}

proptest! {
    #[test]
    fn varint_u64_roundtrip(value: u64) {
        let bytes = written(|w| w.write_varint_u64(value));
        prop_assert!(bytes.len() <= MAX_VARINT_BYTES);

        let mut input = &bytes[..];
        let decoded = BinaryReader::new(&mut input).read_varint_u64().unwrap();
        prop_assert_eq!(decoded, value);
        prop_assert!(input.is_empty());
    }

    #[test]
    fn varint_i64_roundtrip(value: i64) {
        let bytes = written(|w| w.write_varint_i64(value));
        if value < 0 {
            prop_assert_eq!(bytes.len(), MAX_VARINT_BYTES);
        }

        let mut input = &bytes[..];
        let decoded = BinaryReader::new(&mut input).read_varint_i64().unwrap();
        prop_assert_eq!(decoded, value);
    }
}
