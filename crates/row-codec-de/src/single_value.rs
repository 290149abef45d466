//! Decoder for exactly one cell.

use std::convert::Infallible;

use row_codec_core::date::token_text;
use row_codec_core::{Cell, CodingPath, FromCell, OffsetDateTime, DATE_TOKEN};
use serde::de::{IntoDeserializer, Visitor};
use serde::Deserializer;

use crate::error::{DecodeError, Result};
use crate::DecodeContext;

/// Decodes the single cell a keyed or unkeyed container handed out.
#[derive(Debug, Clone)]
pub struct SingleValueDecoder<'de> {
    cell: &'de Cell,
    context: DecodeContext,
    path: CodingPath,
}

impl<'de> SingleValueDecoder<'de> {
    pub fn new(cell: &'de Cell, context: DecodeContext, path: CodingPath) -> Self {
        Self { cell, context, path }
    }

    pub fn cell(&self) -> &'de Cell {
        self.cell
    }

    pub fn coding_path(&self) -> &CodingPath {
        &self.path
    }

    pub fn context(&self) -> &DecodeContext {
        &self.context
    }

    pub fn decode_nil(&self) -> bool {
        self.cell.is_null()
    }

    /// The cell, failing with `ValueNotFound` when it is null.
    pub fn decode_cell(&self, expected: &str) -> Result<&'de Cell> {
        if self.cell.is_null() {
            return Err(DecodeError::value_not_found(
                expected,
                self.path.clone(),
                format!("Cannot get value of type {expected}, found null value instead."),
            ));
        }
        Ok(self.cell)
    }

    pub fn decode<T: FromCell>(&self) -> Result<T> {
        let cell = self.decode_cell(T::EXPECTED)?;
        T::from_cell(cell).ok_or_else(|| self.mismatch(T::EXPECTED))
    }

    /// Decodes a date through the configured date strategy.
    pub fn decode_date(&self) -> Result<OffsetDateTime> {
        self.context.date_strategy.decode(self)
    }

    pub fn single_value_container(self) -> Result<Self> {
        Ok(self)
    }

    pub fn keyed_container(&self) -> Result<Infallible> {
        Err(DecodeError::type_mismatch(
            "keyed container",
            self.path.clone(),
            "Expected a keyed container, but found a single value.",
        ))
    }

    pub fn unkeyed_container(&self) -> Result<Infallible> {
        Err(DecodeError::type_mismatch(
            "unkeyed container",
            self.path.clone(),
            "Expected a unkeyed container, but found a single value.",
        ))
    }

    fn mismatch(&self, expected: &str) -> DecodeError {
        DecodeError::type_mismatch(
            expected,
            self.path.clone(),
            format!("Expected to decode {expected} but found {} instead.", self.cell),
        )
    }

    fn text(&self, expected: &str) -> Result<&'de str> {
        match self.decode_cell(expected)? {
            Cell::Text(text) => Ok(text),
            _ => Err(self.mismatch(expected)),
        }
    }
}

macro_rules! decode_scalars {
    ($($method:ident => $visit:ident: $t:ty),* $(,)?) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
                let value: $t = self.decode()?;
                visitor.$visit(value).map_err(|e: DecodeError| e.anchored(&self.path))
            }
        )*
    };
}

impl<'de> Deserializer<'de> for SingleValueDecoder<'de> {
    type Error = DecodeError;

    decode_scalars! {
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

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let result = match self.cell {
            Cell::Null => visitor.visit_unit(),
            Cell::Integer(v) => visitor.visit_i64(*v),
            Cell::Real(v) => visitor.visit_f64(*v),
            Cell::Text(v) => visitor.visit_borrowed_str(v),
            Cell::Blob(v) => visitor.visit_borrowed_bytes(v),
        };
        result.map_err(|e: DecodeError| e.anchored(&self.path))
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let text = self.text("String")?;
        visitor.visit_borrowed_str(text).map_err(|e: DecodeError| e.anchored(&self.path))
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        match self.decode_cell("Vec<u8>")? {
            Cell::Blob(bytes) => visitor
                .visit_borrowed_bytes(bytes)
                .map_err(|e: DecodeError| e.anchored(&self.path)),
            _ => Err(self.mismatch("Vec<u8>")),
        }
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        let path = self.path.clone();
        let result = if self.decode_nil() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        };
        result.map_err(|e: DecodeError| e.anchored(&path))
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        if !self.decode_nil() {
            return Err(self.mismatch("()"));
        }
        visitor.visit_unit().map_err(|e: DecodeError| e.anchored(&self.path))
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        name: &'static str,
        visitor: V,
    ) -> Result<V::Value> {
        let path = self.path.clone();
        if name == DATE_TOKEN {
            let date = self.decode_date()?;
            let text = token_text(&date).ok_or_else(|| {
                DecodeError::data_corrupted(path.clone(), "Date cannot be expressed as RFC 3339 text.")
            })?;
            return visitor.visit_string(text).map_err(|e: DecodeError| e.anchored(&path));
        }
        visitor.visit_newtype_struct(self).map_err(|e: DecodeError| e.anchored(&path))
    }

    fn deserialize_seq<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value> {
        match self.unkeyed_container()? {}
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

    /// Unit variants only, named by a text cell.
    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value> {
        let text = self.text("enum variant")?;
        visitor
            .visit_enum(text.into_deserializer())
            .map_err(|e: DecodeError| e.anchored(&self.path))
    }

    fn deserialize_identifier<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value> {
        visitor.visit_unit()
    }
}
