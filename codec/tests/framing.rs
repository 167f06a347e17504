use assert_matches::assert_matches;
use proofscope_codec::{
    length_prefixed_len, var_u64_len, write_length_prefixed, write_var_u64, ByteCursor, Error,
};

#[test]
fn written_framing_reads_back_in_order() {
    let mut bytes = vec![];
    write_var_u64(&mut bytes, 110_217_392).unwrap();
    write_length_prefixed(&mut bytes, b"iavl:v").unwrap();
    write_length_prefixed(&mut bytes, &[0xab; 300]).unwrap();
    write_var_u64(&mut bytes, 0).unwrap();

    assert_eq!(
        bytes.len(),
        var_u64_len(110_217_392) + length_prefixed_len(b"iavl:v") + length_prefixed_len(&[0; 300]) + 1
    );

    let mut cursor = ByteCursor::new(&bytes);
    assert_eq!(cursor.read_var_u64().unwrap(), 110_217_392);
    assert_eq!(cursor.read_length_prefixed_str().unwrap(), "iavl:v");
    assert_eq!(cursor.read_length_prefixed().unwrap(), &[0xab; 300][..]);
    assert_eq!(cursor.read_var_u64().unwrap(), 0);
    assert!(cursor.finish().is_ok());
}

#[test]
fn known_varint_encoding_matches_protobuf() {
    let mut bytes = vec![];
    write_var_u64(&mut bytes, 110_217_392).unwrap();
    assert_eq!(bytes, hex::decode("b091c734").unwrap());
}

#[test]
fn every_strict_prefix_of_a_frame_is_a_truncation() {
    let mut bytes = vec![];
    write_length_prefixed(&mut bytes, &[7; 200]).unwrap();
    write_length_prefixed(&mut bytes, b"key").unwrap();

    for cut in 0..bytes.len() {
        let mut cursor = ByteCursor::new(&bytes[..cut]);
        let result = cursor
            .read_length_prefixed()
            .and_then(|_| cursor.read_length_prefixed());
        let err = result.expect_err("prefix must not decode");
        assert!(err.is_truncation(), "cut {cut}: {err}");
    }
}

#[test]
fn errors_report_their_offset() {
    let bytes = [0x01, 0xaa, 0x05, 0x01];
    let mut cursor = ByteCursor::new(&bytes);
    cursor.read_length_prefixed().unwrap();
    let err = cursor.read_length_prefixed().unwrap_err();
    assert_matches!(err, Error::Truncated { offset: 3, .. });
    assert_eq!(err.offset(), 3);
}
