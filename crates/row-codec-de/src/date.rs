use std::sync::Arc;

use row_codec_core::{date_from_millis, date_from_seconds, DateFormatter, Iso8601Formatter, OffsetDateTime};

use crate::error::{DecodeError, Result};
use crate::single_value::SingleValueDecoder;

/// How a date is reconstructed from the cell it was stored in.
#[derive(Debug, Clone, Default)]
pub enum DateDecodingStrategy {
    /// The date's own representation: RFC 3339 text, or seconds since the
    /// Unix epoch stored as an integer or a real.
    #[default]
    DeferredToDate,
    /// Text parsed with the formatter.
    Formatted(Arc<dyn DateFormatter>),
    MillisecondsSince1970Int,
    /// Fractional milliseconds since the Unix epoch. Whole milliseconds are
    /// exact.
    MillisecondsSince1970Double,
    SecondsSince1970Int,
    /// Fractional seconds since the Unix epoch, accurate to the microsecond.
    SecondsSince1970Double,
}

impl DateDecodingStrategy {
    /// `Formatted` with an RFC 3339 formatter.
    pub fn iso8601() -> Self {
        DateDecodingStrategy::Formatted(Arc::new(Iso8601Formatter))
    }

    pub fn formatted(formatter: impl DateFormatter + 'static) -> Self {
        DateDecodingStrategy::Formatted(Arc::new(formatter))
    }

    pub(crate) fn decode(&self, decoder: &SingleValueDecoder<'_>) -> Result<OffsetDateTime> {
        let date = match self {
            DateDecodingStrategy::DeferredToDate => return decoder.decode::<OffsetDateTime>(),
            DateDecodingStrategy::Formatted(formatter) => {
                let text: String = decoder.decode()?;
                return formatter.parse(&text).ok_or_else(|| {
                    DecodeError::data_corrupted(
                        decoder.coding_path().clone(),
                        "Date string does not match format expected by formatter.",
                    )
                });
            }
            DateDecodingStrategy::MillisecondsSince1970Int => {
                let millis: i64 = decoder.decode()?;
                OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000).ok()
            }
            DateDecodingStrategy::MillisecondsSince1970Double => {
                let millis: f64 = decoder.decode()?;
                date_from_millis(millis)
            }
            DateDecodingStrategy::SecondsSince1970Int => {
                let secs: i64 = decoder.decode()?;
                OffsetDateTime::from_unix_timestamp(secs).ok()
            }
            DateDecodingStrategy::SecondsSince1970Double => {
                let secs: f64 = decoder.decode()?;
                date_from_seconds(secs)
            }
        };
        date.ok_or_else(|| {
            DecodeError::data_corrupted(
                decoder.coding_path().clone(),
                "Timestamp is outside the representable date range.",
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DecodeContext;
    use row_codec_core::{Cell, CodingPath, PatternFormatter};
    use time::macros::datetime;

    fn decode(strategy: DateDecodingStrategy, cell: &Cell) -> Result<OffsetDateTime> {
        let context = DecodeContext {
            date_strategy: strategy,
            ..DecodeContext::default()
        };
        SingleValueDecoder::new(cell, context, CodingPath::root().appending("at")).decode_date()
    }

    #[test]
    fn numeric_strategies() {
        let date = datetime!(2009-02-13 23:31:30.25 UTC);
        assert_eq!(
            decode(DateDecodingStrategy::MillisecondsSince1970Int, &Cell::Integer(1_234_567_890_250)),
            Ok(date)
        );
        assert_eq!(
            decode(DateDecodingStrategy::MillisecondsSince1970Double, &Cell::Real(1_234_567_890_250.0)),
            Ok(date)
        );
        assert_eq!(
            decode(DateDecodingStrategy::SecondsSince1970Double, &Cell::Real(1_234_567_890.25)),
            Ok(date)
        );
        assert_eq!(
            decode(DateDecodingStrategy::SecondsSince1970Int, &Cell::Integer(1_234_567_890)),
            Ok(datetime!(2009-02-13 23:31:30 UTC))
        );
    }

    #[test]
    fn formatter_mismatch_is_data_corruption() {
        let strategy = DateDecodingStrategy::formatted(
            PatternFormatter::new("[year]-[month]-[day] [hour]:[minute]").unwrap(),
        );
        assert_eq!(
            decode(strategy.clone(), &Cell::from("2021-07-04 09:15")),
            Ok(datetime!(2021-07-04 09:15:00 UTC))
        );

        let err = decode(strategy, &Cell::from("July 4th")).unwrap_err();
        assert!(matches!(err, DecodeError::DataCorrupted { .. }));
        assert_eq!(err.coding_path().to_string(), "[at]");
        assert_eq!(
            err.context().debug_description,
            "Date string does not match format expected by formatter."
        );
    }

    #[test]
    fn wrong_cell_type_is_a_mismatch() {
        let err = decode(DateDecodingStrategy::iso8601(), &Cell::Integer(5)).unwrap_err();
        assert!(matches!(err, DecodeError::TypeMismatch { .. }));

        let err = decode(DateDecodingStrategy::SecondsSince1970Int, &Cell::Null).unwrap_err();
        assert!(matches!(err, DecodeError::ValueNotFound { .. }));
    }

    #[test]
    fn out_of_range_timestamps_are_rejected() {
        let err = decode(DateDecodingStrategy::SecondsSince1970Int, &Cell::Integer(i64::MAX)).unwrap_err();
        assert!(matches!(err, DecodeError::DataCorrupted { .. }));
    }
}
