//! Decoder matrix: scalar coercion per cell type, date strategies, and the
//! coding paths reported for refused shapes.

use row_codec_core::{Cell, CodingPath, Date, Row};
use row_codec_de::{
    DateDecodingStrategy, DecodeContext, DecodeError, MultiRowDecoder, SingleRowDecoder,
};
use serde::Deserialize;
use time::macros::datetime;

fn single(row: &Row) -> SingleRowDecoder<'_> {
    SingleRowDecoder::new(row, DecodeContext::default(), CodingPath::root())
}

fn with_dates(row: &Row, strategy: DateDecodingStrategy) -> SingleRowDecoder<'_> {
    let context = DecodeContext {
        date_strategy: strategy,
        ..DecodeContext::default()
    };
    SingleRowDecoder::new(row, context, CodingPath::root())
}

// ---------------------------------------------------------------------------
// Scalar coercion
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Deserialize)]
struct Scalars {
    flag: bool,
    small: i8,
    wide: u64,
    ratio: f32,
    real: f64,
    letter: char,
    label: String,
    #[serde(with = "serde_blob")]
    payload: Vec<u8>,
}

// Byte vectors deserialize as sequences by default; ask for bytes instead.
mod serde_blob {
    use serde::de::{Deserializer, Error, Visitor};
    use std::fmt;

    struct ByteBuf;

    impl<'de> Visitor<'de> for ByteBuf {
        type Value = Vec<u8>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("bytes")
        }

        fn visit_bytes<E: Error>(self, v: &[u8]) -> Result<Vec<u8>, E> {
            Ok(v.to_vec())
        }

        fn visit_byte_buf<E: Error>(self, v: Vec<u8>) -> Result<Vec<u8>, E> {
            Ok(v)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        deserializer.deserialize_byte_buf(ByteBuf)
    }
}

fn scalars_row() -> Row {
    [
        ("flag", Cell::Integer(1)),
        ("small", Cell::Integer(-5)),
        ("wide", Cell::Integer(9_000_000_000)),
        ("ratio", Cell::Integer(2)),
        ("real", Cell::Real(0.25)),
        ("letter", Cell::from("z")),
        ("label", Cell::from("hi")),
        ("payload", Cell::Blob(vec![0xDE, 0xAD])),
    ]
    .into_iter()
    .collect()
}

#[test]
fn every_scalar_decodes_from_its_cell() {
    let row = scalars_row();
    assert_eq!(
        Scalars::deserialize(single(&row)),
        Ok(Scalars {
            flag: true,
            small: -5,
            wide: 9_000_000_000,
            ratio: 2.0,
            real: 0.25,
            letter: 'z',
            label: "hi".into(),
            payload: vec![0xDE, 0xAD],
        })
    );
}

#[test]
fn narrowing_overflow_is_a_type_mismatch() {
    let mut row = scalars_row();
    row.insert("small", 200);
    let err = Scalars::deserialize(single(&row)).unwrap_err();
    assert!(matches!(err, DecodeError::TypeMismatch { ref expected, .. } if expected == "i8"));
    assert_eq!(err.coding_path().to_string(), "[small]");
}

#[test]
fn real_cell_does_not_narrow_to_integer() {
    let mut row = scalars_row();
    row.insert("wide", 1.0);
    let err = Scalars::deserialize(single(&row)).unwrap_err();
    assert!(matches!(err, DecodeError::TypeMismatch { .. }));
    assert_eq!(err.coding_path().to_string(), "[wide]");
}

#[test]
fn text_for_blob_is_a_type_mismatch() {
    let mut row = scalars_row();
    row.insert("payload", "dead");
    let err = Scalars::deserialize(single(&row)).unwrap_err();
    assert!(matches!(err, DecodeError::TypeMismatch { .. }));
    assert_eq!(err.coding_path().to_string(), "[payload]");
}

#[test]
fn borrowed_fields_point_into_the_row() {
    #[derive(Deserialize)]
    struct View<'a> {
        label: &'a str,
    }
    let row = scalars_row();
    let view = View::deserialize(single(&row)).unwrap();
    assert_eq!(view.label, "hi");
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Deserialize)]
struct Event {
    at: Date,
    until: Option<Date>,
}

#[test]
fn dates_follow_the_strategy() {
    let expected = Date(datetime!(2009-02-13 23:31:30 UTC));
    let cases = [
        (DateDecodingStrategy::DeferredToDate, Cell::from("2009-02-13T23:31:30Z")),
        (DateDecodingStrategy::DeferredToDate, Cell::Integer(1_234_567_890)),
        (DateDecodingStrategy::iso8601(), Cell::from("2009-02-13T23:31:30Z")),
        (DateDecodingStrategy::SecondsSince1970Int, Cell::Integer(1_234_567_890)),
        (DateDecodingStrategy::SecondsSince1970Double, Cell::Real(1_234_567_890.0)),
        (DateDecodingStrategy::MillisecondsSince1970Int, Cell::Integer(1_234_567_890_000)),
        (DateDecodingStrategy::MillisecondsSince1970Double, Cell::Real(1_234_567_890_000.0)),
    ];
    for (strategy, cell) in cases {
        let row: Row = [("at", cell), ("until", Cell::Null)].into_iter().collect();
        let event = Event::deserialize(with_dates(&row, strategy.clone())).unwrap();
        assert_eq!(event.at, expected, "{strategy:?}");
        assert_eq!(event.until, None);
    }
}

#[test]
fn with_helper_fields_use_the_strategy() {
    #[derive(Deserialize)]
    struct Stamp {
        #[serde(with = "row_codec_core::date")]
        at: time::OffsetDateTime,
    }
    let row: Row = [("at", 1_234_567_890_000i64)].into_iter().collect();
    let stamp = Stamp::deserialize(with_dates(&row, DateDecodingStrategy::MillisecondsSince1970Int))
        .unwrap();
    assert_eq!(stamp.at, datetime!(2009-02-13 23:31:30 UTC));
}

#[test]
fn unparsable_date_text_is_data_corruption() {
    let row: Row = [("at", Cell::from("13/02/2009")), ("until", Cell::Null)]
        .into_iter()
        .collect();
    let err = Event::deserialize(with_dates(&row, DateDecodingStrategy::iso8601())).unwrap_err();
    assert!(matches!(err, DecodeError::DataCorrupted { .. }));
    assert_eq!(err.coding_path().to_string(), "[at]");
}

// ---------------------------------------------------------------------------
// Row arrays
// ---------------------------------------------------------------------------

#[derive(Debug, PartialEq, Deserialize)]
struct Item {
    id: i64,
    name: String,
}

#[test]
fn row_arrays_decode_into_sequences() {
    let rows: Vec<Row> = (1..=3)
        .map(|i| [("id", Cell::from(i)), ("name", Cell::from(format!("item-{i}")))].into_iter().collect())
        .collect();
    let items = Vec::<Item>::deserialize(MultiRowDecoder::new(
        &rows,
        DecodeContext::default(),
        CodingPath::root(),
    ))
    .unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[2], Item { id: 3, name: "item-3".into() });
}

#[test]
fn missing_column_in_a_later_row() {
    let rows: Vec<Row> = vec![
        [("id", Cell::from(1)), ("name", Cell::from("a"))].into_iter().collect(),
        [("id", Cell::from(2))].into_iter().collect(),
    ];
    let err = Vec::<Item>::deserialize(MultiRowDecoder::new(
        &rows,
        DecodeContext::default(),
        CodingPath::root(),
    ))
    .unwrap_err();
    assert!(matches!(err, DecodeError::KeyNotFound { .. }));
    assert_eq!(err.coding_path().to_string(), "[Index 1, name]");
}

#[test]
fn fixed_size_arrays_report_the_missing_position() {
    let rows: Vec<Row> = vec![[("id", Cell::from(1)), ("name", Cell::from("a"))].into_iter().collect()];
    let err = <[Item; 2]>::deserialize(MultiRowDecoder::new(
        &rows,
        DecodeContext::default(),
        CodingPath::root(),
    ))
    .unwrap_err();
    assert!(matches!(err, DecodeError::ValueNotFound { .. }));
    assert_eq!(err.coding_path().to_string(), "[Index 1]");
}
