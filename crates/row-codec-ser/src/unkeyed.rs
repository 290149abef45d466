use row_codec_core::{CodingKey, CodingPath};
use serde::ser::{Serialize, SerializeSeq, SerializeTuple, SerializeTupleStruct};

use crate::error::{EncodeError, Result};
use crate::flatten::is_absent;
use crate::multi_row::MultiRowEncoder;

/// Appends one row per element to a [`MultiRowEncoder`].
///
/// Elements that flatten to `None` are skipped without consuming a row index.
pub struct UnkeyedContainer<'a> {
    encoder: &'a mut MultiRowEncoder,
}

impl<'a> UnkeyedContainer<'a> {
    pub(crate) fn new(encoder: &'a mut MultiRowEncoder) -> Self {
        Self { encoder }
    }

    pub fn coding_path(&self) -> &CodingPath {
        self.encoder.coding_path()
    }

    pub fn count(&self) -> usize {
        self.encoder.count()
    }

    /// Absent elements produce no row.
    pub fn encode_nil(&mut self) {}

    pub fn encode<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        if is_absent(value) {
            self.encode_nil();
            return Ok(());
        }
        let key = CodingKey::Index(self.count());
        let mut nested = self.encoder.encoder(&key);
        value
            .serialize(&mut nested)
            .map_err(|e| e.anchored(nested.coding_path()))?;
        self.encoder.append(nested.into_row());
        Ok(())
    }
}

impl SerializeSeq for UnkeyedContainer<'_> {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.encode(value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl SerializeTuple for UnkeyedContainer<'_> {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.encode(value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl SerializeTupleStruct for UnkeyedContainer<'_> {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.encode(value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}
