use row_codec_core::{Cell, CodingKey, CodingPath, FromCell, OffsetDateTime};
use serde::Deserializer;

use crate::error::{DecodeError, Result};
use crate::DecodeContext;

/// Keyed access to the values of a row (columns) or of a row array (rows).
///
/// Keyed and unkeyed containers are written once against this trait; each
/// implementor decides which requests it can satisfy and how a key resolves.
pub trait RowDecoding<'de> {
    /// Decoder handed out for the value under a key.
    type Nested: Deserializer<'de, Error = DecodeError>;

    fn coding_path(&self) -> &CodingPath;

    fn context(&self) -> &DecodeContext;

    /// Number of addressable values.
    fn count(&self) -> usize;

    fn decode_nil(&self, key: &CodingKey) -> Result<bool>;

    /// The non-null cell under `key`.
    fn decode_cell(&self, key: &CodingKey, expected: &str) -> Result<&'de Cell>;

    fn decode_date(&self, key: &CodingKey) -> Result<OffsetDateTime>;

    fn decoder(&self, key: &CodingKey) -> Result<Self::Nested>;

    fn decode<T: FromCell>(&self, key: &CodingKey) -> Result<T> {
        let cell = self.decode_cell(key, T::EXPECTED)?;
        T::from_cell(cell).ok_or_else(|| {
            DecodeError::type_mismatch(
                T::EXPECTED,
                self.coding_path().appending(key.clone()),
                format!("Expected to decode {} but found {cell} instead.", T::EXPECTED),
            )
        })
    }
}
