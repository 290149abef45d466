use row_codec_core::{CodingKey, CodingPath};
use serde::de::value::BorrowedStrDeserializer;
use serde::de::{DeserializeSeed, MapAccess};
use serde::Deserialize;

use crate::decoder::RowDecoding;
use crate::error::{DecodeError, Result};
use crate::single_row::SingleRowDecoder;
use crate::slot::Slot;

/// Named-column view of a single row.
///
/// As a [`MapAccess`] it yields the row's columns in order; derived structs
/// pick their fields by name and skip columns they do not know.
pub struct KeyedContainer<'a, 'de> {
    decoder: &'a SingleRowDecoder<'de>,
    position: usize,
    pending: Option<&'de str>,
}

impl<'a, 'de> KeyedContainer<'a, 'de> {
    pub(crate) fn new(decoder: &'a SingleRowDecoder<'de>) -> Self {
        Self {
            decoder,
            position: 0,
            pending: None,
        }
    }

    pub fn coding_path(&self) -> &CodingPath {
        self.decoder.coding_path()
    }

    /// Every column of the row, in order.
    pub fn all_keys(&self) -> Vec<CodingKey> {
        self.decoder.row().columns().map(CodingKey::from).collect()
    }

    pub fn contains(&self, key: &CodingKey) -> bool {
        self.decoder.contains(key)
    }

    pub fn decode_nil(&self, key: impl Into<CodingKey>) -> Result<bool> {
        self.decoder.decode_nil(&key.into())
    }

    pub fn decode<T: Deserialize<'de>>(&self, key: impl Into<CodingKey>) -> Result<T> {
        T::deserialize(Slot::new(self.decoder, key.into()))
    }
}

impl<'de> MapAccess<'de> for KeyedContainer<'_, 'de> {
    type Error = DecodeError;

    fn next_key_seed<K: DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>> {
        let Some((column, _)) = self.decoder.row().get_index(self.position) else {
            return Ok(None);
        };
        self.position += 1;
        self.pending = Some(column);
        seed.deserialize(BorrowedStrDeserializer::new(column))
            .map(Some)
            .map_err(|e: DecodeError| e.anchored(&self.coding_path().appending(column)))
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value> {
        let column = self.pending.take().ok_or_else(|| {
            DecodeError::data_corrupted(
                self.coding_path().clone(),
                "Value requested before its column name.",
            )
        })?;
        seed.deserialize(Slot::new(self.decoder, CodingKey::from(column)))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.decoder.count() - self.position)
    }
}
