use std::any::type_name;

use row_codec_core::{CodingKey, CodingPath};
use serde::de::{DeserializeSeed, SeqAccess};
use serde::Deserialize;

use crate::decoder::RowDecoding;
use crate::error::{DecodeError, Result};
use crate::slot::Slot;

/// Positional view over a decoder: the columns of a row, or the rows of an
/// array. The cursor only moves past an element once it decoded.
pub struct UnkeyedContainer<'a, D> {
    decoder: &'a D,
    current_index: usize,
}

impl<'a, 'de, D: RowDecoding<'de>> UnkeyedContainer<'a, D> {
    pub(crate) fn new(decoder: &'a D) -> Self {
        Self {
            decoder,
            current_index: 0,
        }
    }

    pub fn coding_path(&self) -> &CodingPath {
        self.decoder.coding_path()
    }

    pub fn count(&self) -> usize {
        self.decoder.count()
    }

    pub fn is_at_end(&self) -> bool {
        self.current_index >= self.count()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Consumes the current element if it is null.
    pub fn decode_nil(&mut self) -> Result<bool> {
        let key = self.next_key::<()>()?;
        let nil = self.decoder.decode_nil(&key)?;
        if nil {
            self.current_index += 1;
        }
        Ok(nil)
    }

    pub fn decode<T: Deserialize<'de>>(&mut self) -> Result<T> {
        let key = self.next_key::<T>()?;
        let value = T::deserialize(Slot::new(self.decoder, key))?;
        self.current_index += 1;
        Ok(value)
    }

    fn next_key<T>(&self) -> Result<CodingKey> {
        let key = CodingKey::Index(self.current_index);
        if self.is_at_end() {
            return Err(DecodeError::value_not_found(
                type_name::<T>(),
                self.coding_path().appending(key),
                "Unkeyed container is at end.",
            ));
        }
        Ok(key)
    }
}

impl<'de, D: RowDecoding<'de>> SeqAccess<'de> for UnkeyedContainer<'_, D> {
    type Error = DecodeError;

    fn next_element_seed<T: DeserializeSeed<'de>>(&mut self, seed: T) -> Result<Option<T::Value>> {
        if self.is_at_end() {
            return Ok(None);
        }
        let value = seed.deserialize(Slot::new(self.decoder, CodingKey::Index(self.current_index)))?;
        self.current_index += 1;
        Ok(Some(value))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.count().saturating_sub(self.current_index))
    }
}
