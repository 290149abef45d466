//! Decoder for one row.

use std::convert::Infallible;

use row_codec_core::{Cell, CodingKey, CodingPath, OffsetDateTime, Row, DATE_TOKEN};
use serde::de::Visitor;
use serde::Deserializer;

use crate::decoder::RowDecoding;
use crate::error::{DecodeError, Result};
use crate::keyed::KeyedContainer;
use crate::single_value::SingleValueDecoder;
use crate::unkeyed::UnkeyedContainer;
use crate::DecodeContext;

/// Decodes a struct, map or tuple from the columns of one row.
#[derive(Debug, Clone)]
pub struct SingleRowDecoder<'de> {
    row: &'de Row,
    context: DecodeContext,
    path: CodingPath,
}

impl<'de> SingleRowDecoder<'de> {
    pub fn new(row: &'de Row, context: DecodeContext, path: CodingPath) -> Self {
        Self { row, context, path }
    }

    pub fn row(&self) -> &'de Row {
        self.row
    }

    pub fn contains(&self, key: &CodingKey) -> bool {
        self.row.contains_key(key)
    }

    pub fn keyed_container(&self) -> KeyedContainer<'_, 'de> {
        KeyedContainer::new(self)
    }

    /// The row's columns in order.
    pub fn unkeyed_container(&self) -> UnkeyedContainer<'_, Self> {
        UnkeyedContainer::new(self)
    }

    pub fn single_value_container(&self) -> Result<Infallible> {
        Err(DecodeError::type_mismatch(
            "single value container",
            self.path.clone(),
            "Expected a single value container, but found a row value.",
        ))
    }

    fn cell(&self, key: &CodingKey) -> Result<&'de Cell> {
        self.row.get_by_key(key).ok_or_else(|| {
            DecodeError::key_not_found(
                key.clone(),
                self.path.appending(key.clone()),
                format!("No value associated with key {key}."),
            )
        })
    }
}

impl<'de> RowDecoding<'de> for SingleRowDecoder<'de> {
    type Nested = SingleValueDecoder<'de>;

    fn coding_path(&self) -> &CodingPath {
        &self.path
    }

    fn context(&self) -> &DecodeContext {
        &self.context
    }

    fn count(&self) -> usize {
        self.row.len()
    }

    fn decode_nil(&self, key: &CodingKey) -> Result<bool> {
        Ok(self.cell(key)?.is_null())
    }

    fn decode_cell(&self, key: &CodingKey, expected: &str) -> Result<&'de Cell> {
        self.decoder(key)?.decode_cell(expected)
    }

    fn decode_date(&self, key: &CodingKey) -> Result<OffsetDateTime> {
        self.decoder(key)?.decode_date()
    }

    fn decoder(&self, key: &CodingKey) -> Result<SingleValueDecoder<'de>> {
        let cell = self.cell(key)?;
        Ok(SingleValueDecoder::new(
            cell,
            self.context.clone(),
            self.path.appending(key.clone()),
        ))
    }
}

macro_rules! refuse_single_value {
    ($($method:ident($($ty:ty),*)),* $(,)?) => {
        $(
            fn $method<V: Visitor<'de>>(self, $(_: $ty,)* _visitor: V) -> Result<V::Value> {
                match self.single_value_container()? {}
            }
        )*
    };
}

impl<'de> Deserializer<'de> for SingleRowDecoder<'de> {
    type Error = DecodeError;

    refuse_single_value! {
        deserialize_bool(),
        deserialize_i8(),
        deserialize_i16(),
        deserialize_i32(),
        deserialize_i64(),
        deserialize_u8(),
        deserialize_u16(),
        deserialize_u32(),
        deserialize_u64(),
        deserialize_f32(),
        deserialize_f64(),
        deserialize_char(),
        deserialize_str(),
        deserialize_string(),
        deserialize_bytes(),
        deserialize_byte_buf(),
        deserialize_option(),
        deserialize_unit(),
        deserialize_unit_struct(&'static str),
        deserialize_enum(&'static str, &'static [&'static str]),
        deserialize_identifier(),
    }

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_map(visitor)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        if name == DATE_TOKEN {
            match self.single_value_container()? {}
        }
        let path = self.path.clone();
        visitor.visit_newtype_struct(self).map_err(|e: DecodeError| e.anchored(&path))
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor
            .visit_seq(self.unkeyed_container())
            .map_err(|e: DecodeError| e.anchored(&self.path))
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, _len: usize, visitor: V) -> Result<V::Value> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value> {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor
            .visit_map(self.keyed_container())
            .map_err(|e: DecodeError| e.anchored(&self.path))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        self.deserialize_map(visitor)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_unit()
    }
}
