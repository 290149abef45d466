use std::sync::Arc;

use row_codec_core::date::parse_token_text;
use row_codec_core::{
    millis_since_epoch, seconds_since_epoch, Cell, CodingPath, DateFormatter, Iso8601Formatter,
    OffsetDateTime, ToCell,
};
use serde::ser::{Impossible, Serialize, Serializer};

use crate::error::{EncodeError, Result};

/// How a date is stored in a cell.
#[derive(Debug, Clone, Default)]
pub enum DateEncodingStrategy {
    /// RFC 3339 text.
    #[default]
    DeferredToDate,
    /// Text produced by the formatter.
    Formatted(Arc<dyn DateFormatter>),
    /// Whole milliseconds since the Unix epoch, truncated toward zero.
    MillisecondsSince1970Int,
    /// Fractional milliseconds since the Unix epoch. Whole milliseconds are
    /// exact.
    MillisecondsSince1970Double,
    /// Whole seconds since the Unix epoch, truncated toward zero.
    SecondsSince1970Int,
    /// Fractional seconds since the Unix epoch, accurate to the microsecond.
    SecondsSince1970Double,
}

impl DateEncodingStrategy {
    /// `Formatted` with an RFC 3339 formatter.
    pub fn iso8601() -> Self {
        DateEncodingStrategy::Formatted(Arc::new(Iso8601Formatter))
    }

    pub fn formatted(formatter: impl DateFormatter + 'static) -> Self {
        DateEncodingStrategy::Formatted(Arc::new(formatter))
    }

    pub(crate) fn encode(&self, date: &OffsetDateTime, path: &CodingPath) -> Result<Cell> {
        let nanos = date.unix_timestamp_nanos();
        let cell = match self {
            DateEncodingStrategy::DeferredToDate => date.to_cell(),
            DateEncodingStrategy::Formatted(formatter) => formatter.format(date).map(Cell::Text),
            DateEncodingStrategy::MillisecondsSince1970Int => {
                i64::try_from(nanos / 1_000_000).ok().map(Cell::Integer)
            }
            DateEncodingStrategy::MillisecondsSince1970Double => {
                Some(Cell::Real(millis_since_epoch(date)))
            }
            DateEncodingStrategy::SecondsSince1970Int => {
                i64::try_from(nanos / 1_000_000_000).ok().map(Cell::Integer)
            }
            DateEncodingStrategy::SecondsSince1970Double => {
                Some(Cell::Real(seconds_since_epoch(date)))
            }
        };
        cell.ok_or_else(|| {
            EncodeError::invalid_value(
                format!("date {date}"),
                path.clone(),
                "Date cannot be represented with the configured date strategy.",
            )
        })
    }
}

/// Recovers the date carried by a date-token newtype.
pub(crate) fn capture_date<T: Serialize + ?Sized>(value: &T, path: &CodingPath) -> Result<OffsetDateTime> {
    let text = value.serialize(TokenText { path })?;
    parse_token_text(&text).ok_or_else(|| {
        EncodeError::invalid_value(
            text,
            path.clone(),
            "Date token does not carry an RFC 3339 timestamp.",
        )
    })
}

/// Accepts the single string a date token wraps.
struct TokenText<'a> {
    path: &'a CodingPath,
}

impl TokenText<'_> {
    fn unsupported(&self, op: &str) -> EncodeError {
        EncodeError::unsupported(op, self.path.clone())
    }
}

impl Serializer for TokenText<'_> {
    type Ok = String;
    type Error = EncodeError;
    type SerializeSeq = Impossible<String, EncodeError>;
    type SerializeTuple = Impossible<String, EncodeError>;
    type SerializeTupleStruct = Impossible<String, EncodeError>;
    type SerializeTupleVariant = Impossible<String, EncodeError>;
    type SerializeMap = Impossible<String, EncodeError>;
    type SerializeStruct = Impossible<String, EncodeError>;
    type SerializeStructVariant = Impossible<String, EncodeError>;

    fn serialize_str(self, v: &str) -> Result<String> {
        Ok(v.to_owned())
    }

    refuse! {
        serialize_bool(bool) -> String;
        serialize_i8(i8) -> String;
        serialize_i16(i16) -> String;
        serialize_i32(i32) -> String;
        serialize_i64(i64) -> String;
        serialize_u8(u8) -> String;
        serialize_u16(u16) -> String;
        serialize_u32(u32) -> String;
        serialize_u64(u64) -> String;
        serialize_f32(f32) -> String;
        serialize_f64(f64) -> String;
        serialize_char(char) -> String;
        serialize_bytes(&[u8]) -> String;
        serialize_none() -> String;
        serialize_some<T>(&T) -> String;
        serialize_unit() -> String;
        serialize_unit_struct(&'static str) -> String;
        serialize_unit_variant(&'static str, u32, &'static str) -> String;
        serialize_newtype_struct<T>(&'static str, &T) -> String;
        serialize_newtype_variant<T>(&'static str, u32, &'static str, &T) -> String;
        serialize_seq(Option<usize>) -> Self::SerializeSeq;
        serialize_tuple(usize) -> Self::SerializeTuple;
        serialize_tuple_struct(&'static str, usize) -> Self::SerializeTupleStruct;
        serialize_tuple_variant(&'static str, u32, &'static str, usize) -> Self::SerializeTupleVariant;
        serialize_map(Option<usize>) -> Self::SerializeMap;
        serialize_struct(&'static str, usize) -> Self::SerializeStruct;
        serialize_struct_variant(&'static str, u32, &'static str, usize) -> Self::SerializeStructVariant;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use row_codec_core::{Date, PatternFormatter};
    use time::macros::datetime;

    fn encode(strategy: DateEncodingStrategy, date: OffsetDateTime) -> Result<Cell> {
        strategy.encode(&date, &CodingPath::root().appending("at"))
    }

    #[test]
    fn every_strategy() {
        let date = datetime!(2009-02-13 23:31:30.75 UTC);
        assert_eq!(
            encode(DateEncodingStrategy::DeferredToDate, date),
            Ok(Cell::from("2009-02-13T23:31:30.75Z"))
        );
        assert_eq!(
            encode(DateEncodingStrategy::MillisecondsSince1970Int, date),
            Ok(Cell::Integer(1_234_567_890_750))
        );
        assert_eq!(
            encode(DateEncodingStrategy::MillisecondsSince1970Double, date),
            Ok(Cell::Real(1_234_567_890_750.0))
        );
        assert_eq!(
            encode(DateEncodingStrategy::SecondsSince1970Int, date),
            Ok(Cell::Integer(1_234_567_890))
        );
        assert_eq!(
            encode(DateEncodingStrategy::SecondsSince1970Double, date),
            Ok(Cell::Real(1_234_567_890.75))
        );
        let formatter = PatternFormatter::new("[day].[month].[year]").unwrap();
        assert_eq!(
            encode(DateEncodingStrategy::formatted(formatter), date),
            Ok(Cell::from("13.02.2009"))
        );
    }

    #[test]
    fn integer_strategies_truncate_toward_zero() {
        let before_epoch = datetime!(1969-12-31 23:59:59.5 UTC);
        assert_eq!(
            encode(DateEncodingStrategy::SecondsSince1970Int, before_epoch),
            Ok(Cell::Integer(0))
        );
        assert_eq!(
            encode(DateEncodingStrategy::MillisecondsSince1970Int, before_epoch),
            Ok(Cell::Integer(-500))
        );
    }

    #[test]
    fn token_capture_recovers_the_date() {
        let date = datetime!(2020-05-01 12:00:00 UTC);
        let path = CodingPath::root();
        struct Inner(Date);
        impl Serialize for Inner {
            fn serialize<S: Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
                s.serialize_str(&row_codec_core::date::token_text(&self.0 .0).unwrap())
            }
        }
        assert_eq!(capture_date(&Inner(Date(date)), &path), Ok(date));
        assert!(capture_date(&5i64, &path).is_err());
        assert!(capture_date("soon", &path).is_err());
    }
}
