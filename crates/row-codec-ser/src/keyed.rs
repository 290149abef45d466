use row_codec_core::{CodingKey, CodingPath};
use serde::ser::{Impossible, Serialize, SerializeMap, SerializeStruct, Serializer};

use crate::error::{EncodeError, Result};
use crate::single_row::SingleRowEncoder;

/// Writes named columns into the row of a [`SingleRowEncoder`].
pub struct KeyedContainer<'a> {
    encoder: &'a mut SingleRowEncoder,
    pending_key: Option<CodingKey>,
}

impl<'a> KeyedContainer<'a> {
    pub(crate) fn new(encoder: &'a mut SingleRowEncoder) -> Self {
        Self {
            encoder,
            pending_key: None,
        }
    }

    pub fn coding_path(&self) -> &CodingPath {
        self.encoder.coding_path()
    }

    pub fn encode_nil(&mut self, key: impl Into<CodingKey>) {
        self.encoder.encode_nil(&key.into());
    }

    /// Serializes `value` into the column named by `key`.
    pub fn encode<T: Serialize + ?Sized>(&mut self, key: impl Into<CodingKey>, value: &T) -> Result<()> {
        let key = key.into();
        let mut nested = self.encoder.encoder(&key);
        value
            .serialize(&mut nested)
            .map_err(|e| e.anchored(nested.coding_path()))?;
        self.encoder.set(nested.into_cell(), &key)
    }
}

impl SerializeStruct for KeyedContainer<'_> {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, key: &'static str, value: &T) -> Result<()> {
        self.encode(key, value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl SerializeMap for KeyedContainer<'_> {
    type Ok = ();
    type Error = EncodeError;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<()> {
        let path = self.coding_path().clone();
        self.pending_key = Some(key.serialize(ColumnName { path: &path })?);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        let key = self.pending_key.take().ok_or_else(|| {
            EncodeError::invalid_value(
                "map value",
                self.coding_path().clone(),
                "Map value serialized before its key.",
            )
        })?;
        self.encode(key, value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

/// Turns a map key into a column name. Strings, characters, integers and
/// unit variants are accepted.
struct ColumnName<'a> {
    path: &'a CodingPath,
}

impl ColumnName<'_> {
    fn unsupported(&self, op: &str) -> EncodeError {
        EncodeError::unsupported(op, self.path.clone())
    }
}

macro_rules! integer_columns {
    ($($method:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method(self, v: $ty) -> Result<CodingKey> {
                Ok(CodingKey::Str(v.to_string()))
            }
        )*
    };
}

impl Serializer for ColumnName<'_> {
    type Ok = CodingKey;
    type Error = EncodeError;
    type SerializeSeq = Impossible<CodingKey, EncodeError>;
    type SerializeTuple = Impossible<CodingKey, EncodeError>;
    type SerializeTupleStruct = Impossible<CodingKey, EncodeError>;
    type SerializeTupleVariant = Impossible<CodingKey, EncodeError>;
    type SerializeMap = Impossible<CodingKey, EncodeError>;
    type SerializeStruct = Impossible<CodingKey, EncodeError>;
    type SerializeStructVariant = Impossible<CodingKey, EncodeError>;

    integer_columns! {
        serialize_i8(i8),
        serialize_i16(i16),
        serialize_i32(i32),
        serialize_i64(i64),
        serialize_u8(u8),
        serialize_u16(u16),
        serialize_u32(u32),
        serialize_u64(u64),
        serialize_char(char),
    }

    fn serialize_str(self, v: &str) -> Result<CodingKey> {
        Ok(CodingKey::from(v))
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<CodingKey> {
        Ok(CodingKey::from(variant))
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<CodingKey> {
        value.serialize(self)
    }

    refuse! {
        serialize_bool(bool) -> CodingKey;
        serialize_f32(f32) -> CodingKey;
        serialize_f64(f64) -> CodingKey;
        serialize_bytes(&[u8]) -> CodingKey;
        serialize_none() -> CodingKey;
        serialize_some<T>(&T) -> CodingKey;
        serialize_unit() -> CodingKey;
        serialize_unit_struct(&'static str) -> CodingKey;
        serialize_newtype_variant<T>(&'static str, u32, &'static str, &T) -> CodingKey;
        serialize_seq(Option<usize>) -> Self::SerializeSeq;
        serialize_tuple(usize) -> Self::SerializeTuple;
        serialize_tuple_struct(&'static str, usize) -> Self::SerializeTupleStruct;
        serialize_tuple_variant(&'static str, u32, &'static str, usize) -> Self::SerializeTupleVariant;
        serialize_map(Option<usize>) -> Self::SerializeMap;
        serialize_struct(&'static str, usize) -> Self::SerializeStruct;
        serialize_struct_variant(&'static str, u32, &'static str, usize) -> Self::SerializeStructVariant;
    }
}
