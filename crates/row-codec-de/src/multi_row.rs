//! Decoder for an array of rows.

use std::convert::Infallible;

use row_codec_core::{Cell, CodingKey, CodingPath, OffsetDateTime, Row, DATE_TOKEN};
use serde::de::Visitor;
use serde::Deserializer;

use crate::decoder::RowDecoding;
use crate::error::{DecodeError, Result};
use crate::single_row::SingleRowDecoder;
use crate::unkeyed::UnkeyedContainer;
use crate::DecodeContext;

/// Decodes a sequence whose elements each come from one row.
#[derive(Debug, Clone)]
pub struct MultiRowDecoder<'de> {
    rows: &'de [Row],
    context: DecodeContext,
    path: CodingPath,
}

impl<'de> MultiRowDecoder<'de> {
    pub fn new(rows: &'de [Row], context: DecodeContext, path: CodingPath) -> Self {
        Self { rows, context, path }
    }

    pub fn rows(&self) -> &'de [Row] {
        self.rows
    }

    pub fn keyed_container(&self) -> Result<Infallible> {
        Err(DecodeError::type_mismatch(
            "keyed container",
            self.path.clone(),
            "Expected a keyed container, but found an array of rows.",
        ))
    }

    pub fn unkeyed_container(&self) -> UnkeyedContainer<'_, Self> {
        UnkeyedContainer::new(self)
    }

    pub fn single_value_container(&self) -> Result<Infallible> {
        Err(DecodeError::type_mismatch(
            "single value container",
            self.path.clone(),
            "Expected a single value container, but found an array of rows.",
        ))
    }

    fn element_mismatch(&self, key: &CodingKey, expected: &str) -> DecodeError {
        DecodeError::type_mismatch(
            expected,
            self.path.appending(key.clone()),
            format!("Expected a type of {expected}, but found an array of rows."),
        )
    }
}

impl<'de> RowDecoding<'de> for MultiRowDecoder<'de> {
    type Nested = SingleRowDecoder<'de>;

    fn coding_path(&self) -> &CodingPath {
        &self.path
    }

    fn context(&self) -> &DecodeContext {
        &self.context
    }

    fn count(&self) -> usize {
        self.rows.len()
    }

    fn decode_nil(&self, key: &CodingKey) -> Result<bool> {
        Err(DecodeError::data_corrupted(
            self.path.appending(key.clone()),
            "Attempted to decode nil, but it's not supported for an array of rows.",
        ))
    }

    fn decode_cell(&self, key: &CodingKey, expected: &str) -> Result<&'de Cell> {
        Err(self.element_mismatch(key, expected))
    }

    fn decode_date(&self, key: &CodingKey) -> Result<OffsetDateTime> {
        Err(self.element_mismatch(key, "Date"))
    }

    fn decoder(&self, key: &CodingKey) -> Result<SingleRowDecoder<'de>> {
        let index = key.as_index().ok_or_else(|| {
            DecodeError::key_not_found(
                key.clone(),
                self.path.appending(key.clone()),
                "Expected an integer key, but found a non-integer key.",
            )
        })?;
        let row = self.rows.get(index).ok_or_else(|| {
            DecodeError::key_not_found(
                key.clone(),
                self.path.appending(key.clone()),
                format!("Index {index} is out of bounds for {} rows.", self.rows.len()),
            )
        })?;
        Ok(SingleRowDecoder::new(
            row,
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

impl<'de> Deserializer<'de> for MultiRowDecoder<'de> {
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
        self.deserialize_seq(visitor)
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

    fn deserialize_map<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        match self.keyed_container()? {}
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
