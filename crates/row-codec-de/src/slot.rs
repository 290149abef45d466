//! Deserializer for one keyed field or unkeyed element.

use row_codec_core::date::token_text;
use row_codec_core::{Cell, CodingKey, CodingPath, DATE_TOKEN};
use serde::de::Visitor;
use serde::Deserializer;

use crate::decoder::RowDecoding;
use crate::error::{DecodeError, Result};

/// A value addressed by `key` inside `decoder`.
///
/// Scalars, nil checks and dates are answered by the parent decoder so that
/// its refusal rules apply; anything else descends into the nested decoder.
pub(crate) struct Slot<'a, D> {
    decoder: &'a D,
    key: CodingKey,
}

impl<'a, D> Slot<'a, D> {
    pub(crate) fn new(decoder: &'a D, key: CodingKey) -> Self {
        Self { decoder, key }
    }
}

impl<'a, 'de, D: RowDecoding<'de>> Slot<'a, D> {
    fn path(&self) -> CodingPath {
        self.decoder.coding_path().appending(self.key.clone())
    }

    fn mismatch(&self, expected: &str, cell: &Cell) -> DecodeError {
        DecodeError::type_mismatch(
            expected,
            self.path(),
            format!("Expected to decode {expected} but found {cell} instead."),
        )
    }
}

macro_rules! slot_scalars {
    ($($method:ident => $visit:ident: $t:ty),* $(,)?) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
                let value: $t = self.decoder.decode(&self.key)?;
                visitor.$visit(value).map_err(|e: DecodeError| e.anchored(&self.path()))
            }
        )*
    };
}

macro_rules! slot_nested {
    ($($method:ident($($arg:ident: $ty:ty),*)),* $(,)?) => {
        $(
            fn $method<V: Visitor<'de>>(self, $($arg: $ty,)* visitor: V) -> Result<V::Value> {
                self.decoder.decoder(&self.key)?.$method($($arg,)* visitor)
            }
        )*
    };
}

impl<'a, 'de, D: RowDecoding<'de>> Deserializer<'de> for Slot<'a, D> {
    type Error = DecodeError;

    slot_scalars! {
        deserialize_bool => visit_bool: bool,
        deserialize_i8 => visit_i8: i8,
        deserialize_i16 => visit_i16: i16,
        deserialize_i32 => visit_i32: i32,
        deserialize_i64 => visit_i64: i64,
        deserialize_u8 => visit_u8: u8,
        deserialize_u16 => visit_u16: u16,
        deserialize_u32 => visit_u32: u32,
        deserialize_u64 => visit_u64: u64,
        deserialize_f32 => visit_f32: f32,
        deserialize_f64 => visit_f64: f64,
        deserialize_char => visit_char: char,
    }

    slot_nested! {
        deserialize_any(),
        deserialize_unit(),
        deserialize_unit_struct(name: &'static str),
        deserialize_seq(),
        deserialize_tuple(len: usize),
        deserialize_tuple_struct(name: &'static str, len: usize),
        deserialize_map(),
        deserialize_struct(name: &'static str, fields: &'static [&'static str]),
        deserialize_enum(name: &'static str, variants: &'static [&'static str]),
        deserialize_identifier(),
        deserialize_ignored_any(),
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.decoder.decode_cell(&self.key, "String")? {
            Cell::Text(text) => visitor
                .visit_borrowed_str(text)
                .map_err(|e: DecodeError| e.anchored(&self.path())),
            cell => Err(self.mismatch("String", cell)),
        }
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.decoder.decode_cell(&self.key, "Vec<u8>")? {
            Cell::Blob(bytes) => visitor
                .visit_borrowed_bytes(bytes)
                .map_err(|e: DecodeError| e.anchored(&self.path())),
            cell => Err(self.mismatch("Vec<u8>", cell)),
        }
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let path = self.path();
        let result = if self.decoder.decode_nil(&self.key)? {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        };
        result.map_err(|e: DecodeError| e.anchored(&path))
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        if name != DATE_TOKEN {
            return self.decoder.decoder(&self.key)?.deserialize_newtype_struct(name, visitor);
        }
        let path = self.path();
        let date = self.decoder.decode_date(&self.key)?;
        let text = token_text(&date).ok_or_else(|| {
            DecodeError::data_corrupted(path.clone(), "Date cannot be expressed as RFC 3339 text.")
        })?;
        visitor.visit_string(text).map_err(|e: DecodeError| e.anchored(&path))
    }
}
