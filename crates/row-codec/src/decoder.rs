use std::any::type_name;

use row_codec_core::{CodingPath, Row, UserInfo};
use row_codec_de::{DateDecodingStrategy, DecodeContext, DecodeError, MultiRowDecoder, SingleRowDecoder};
use serde::de::Deserialize;

/// Decodes rows into serde types.
///
/// A decoder holds the date strategy and user info handed to every nested
/// decoder of a call. It can be shared between threads; calls are
/// independent.
#[derive(Debug, Clone, Default)]
pub struct RowDecoder {
    context: DecodeContext,
}

impl RowDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_strategy(mut self, strategy: DateDecodingStrategy) -> Self {
        self.context.date_strategy = strategy;
        self
    }

    pub fn with_user_info(mut self, user_info: UserInfo) -> Self {
        self.context.user_info = user_info;
        self
    }

    pub fn date_strategy(&self) -> &DateDecodingStrategy {
        &self.context.date_strategy
    }

    pub fn user_info(&self) -> &UserInfo {
        &self.context.user_info
    }

    /// Decodes a struct or map from the columns of `row`.
    ///
    /// Borrowed fields (`&str`, `&[u8]`) point into `row`.
    pub fn decode<'de, T: Deserialize<'de>>(&self, row: &'de Row) -> Result<T, DecodeError> {
        tracing::trace!(
            columns = row.len(),
            value_type = type_name::<T>(),
            strategy = ?self.context.date_strategy,
            "decoding row"
        );
        let decoder = SingleRowDecoder::new(row, self.context.clone(), CodingPath::root());
        T::deserialize(decoder).inspect_err(|err| {
            tracing::debug!(%err, value_type = type_name::<T>(), "row decode failed");
        })
    }

    /// Decodes one element per row.
    pub fn decode_many<'de, T: Deserialize<'de>>(
        &self,
        rows: &'de [Row],
    ) -> Result<Vec<T>, DecodeError> {
        tracing::trace!(
            rows = rows.len(),
            value_type = type_name::<T>(),
            strategy = ?self.context.date_strategy,
            "decoding rows"
        );
        let decoder = MultiRowDecoder::new(rows, self.context.clone(), CodingPath::root());
        Vec::<T>::deserialize(decoder).inspect_err(|err| {
            tracing::debug!(%err, value_type = type_name::<T>(), "rows decode failed");
        })
    }
}

/// Decodes `row` with the default settings.
pub fn from_row<'de, T: Deserialize<'de>>(row: &'de Row) -> Result<T, DecodeError> {
    RowDecoder::new().decode(row)
}

/// Decodes `rows` with the default settings.
pub fn from_rows<'de, T: Deserialize<'de>>(rows: &'de [Row]) -> Result<Vec<T>, DecodeError> {
    RowDecoder::new().decode_many(rows)
}
