use lebcodec::{
    Leb128, LebError, SignedLeb128, UnsignedLeb128, VarintReader, VarintWriter, MAX_SAFE_INTEGER,
};

fn round_trip(value: i64) {
    let encoded = Leb128::encode(value).expect("encode");
    let decoded = Leb128::decode(&encoded, 0, value < 0).expect("decode");
    assert_eq!(decoded, value);
    assert_eq!(Leb128::get_length(&encoded, 0).expect("length"), encoded.len());
}

#[test]
fn edges_roundtrip() {
    let scenarios = [
        vec![0, 1, 127, 128, 255, 16_383, 16_384],
        vec![u32::MAX as i64, (1i64 << 40) - 1, MAX_SAFE_INTEGER],
        vec![-1, -127, -128, -129, -16_384, -16_385],
        vec![-(u32::MAX as i64), -(1i64 << 40), -MAX_SAFE_INTEGER],
    ];

    for values in scenarios {
        for v in values {
            round_trip(v);
        }
    }
}

#[test]
fn minimality() {
    assert_eq!(UnsignedLeb128::encode(0).unwrap(), [0x00]);
    assert_eq!(UnsignedLeb128::encode(127).unwrap(), [0x7F]);
    assert_eq!(UnsignedLeb128::encode(128).unwrap(), [0x80, 0x01]);
    for shift in 0..53usize {
        let value = 1i64 << shift;
        let bit_length = shift + 1;
        assert_eq!(
            UnsignedLeb128::encode(value).unwrap().len(),
            bit_length.div_ceil(7)
        );
    }
}

#[test]
fn offset_independence() {
    for value in [0i64, 300, 624_485, MAX_SAFE_INTEGER] {
        let mut buf = vec![0x01, 0x02, 0x03];
        buf.extend(UnsignedLeb128::encode(value).unwrap());
        assert_eq!(Leb128::decode(&buf, 3, false).unwrap(), value);
    }
    for value in [-1i64, -300, -624_485, -MAX_SAFE_INTEGER] {
        let mut buf = vec![0x01, 0x02, 0x03];
        buf.extend(SignedLeb128::encode(value).unwrap());
        assert_eq!(Leb128::decode(&buf, 3, true).unwrap(), value);
    }
}

#[test]
fn sign_rejection() {
    assert!(matches!(
        UnsignedLeb128::encode(-1),
        Err(LebError::SignMismatch { value: -1, .. })
    ));
    assert!(matches!(
        SignedLeb128::encode(1),
        Err(LebError::SignMismatch { value: 1, .. })
    ));
}

#[test]
fn invalid_inputs() {
    for value in [1.1, f64::NAN, 2e55] {
        assert!(matches!(
            Leb128::encode_f64(value),
            Err(LebError::InvalidInput(_))
        ));
    }
    assert!(matches!(
        lebcodec::parse_safe_integer("1 apple"),
        Err(LebError::InvalidInput(_))
    ));
    let err = Leb128::decode(&[0xFF, 0x80, 0xE8], 0, false).unwrap_err();
    assert!(matches!(err, LebError::UnterminatedSequence { .. }));
}

#[test]
fn mixed_stream() {
    let values = [0i64, -1, 300, -300, MAX_SAFE_INTEGER, -MAX_SAFE_INTEGER, 42];
    let mut writer = VarintWriter::new();
    for value in values {
        writer.write(value).unwrap();
    }
    let bytes = writer.into_bytes();
    let mut reader = VarintReader::new(&bytes);
    for value in values {
        assert_eq!(reader.read(value < 0).unwrap(), value);
    }
    assert!(reader.is_empty());
}
