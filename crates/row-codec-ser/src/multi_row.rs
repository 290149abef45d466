//! Encoder producing an array of rows.

use std::any::type_name;

use row_codec_core::{CodingKey, CodingPath, OffsetDateTime, Row, ToCell, DATE_TOKEN};
use serde::ser::{Impossible, Serialize, Serializer};

use crate::error::{EncodeError, Result};
use crate::single_row::SingleRowEncoder;
use crate::unkeyed::UnkeyedContainer;
use crate::EncodeContext;

/// Accumulates one row per element of a sequence.
#[derive(Debug, Clone)]
pub struct MultiRowEncoder {
    context: EncodeContext,
    path: CodingPath,
    rows: Vec<Row>,
}

impl MultiRowEncoder {
    pub fn new(context: EncodeContext, path: CodingPath) -> Self {
        Self {
            context,
            path,
            rows: Vec::new(),
        }
    }

    pub fn coding_path(&self) -> &CodingPath {
        &self.path
    }

    pub fn context(&self) -> &EncodeContext {
        &self.context
    }

    /// Number of rows appended so far.
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn encode_nil(&mut self, key: &CodingKey) -> Result<()> {
        Err(EncodeError::invalid_value(
            "nil",
            self.path.appending(key.clone()),
            "Attempted to encode nil, but it's not supported.",
        ))
    }

    pub fn encode_date(&mut self, date: &OffsetDateTime, key: &CodingKey) -> Result<()> {
        Err(EncodeError::invalid_value(
            format!("date {date}"),
            self.path.appending(key.clone()),
            "Attempted to encode Date, but it's not supported.",
        ))
    }

    pub fn encode<T: ToCell + ?Sized>(&mut self, _value: &T, key: &CodingKey) -> Result<()> {
        Err(EncodeError::invalid_value(
            type_name::<T>(),
            self.path.appending(key.clone()),
            format!("Attempted to encode {}, but it's not supported.", type_name::<T>()),
        ))
    }

    /// Fresh encoder for the row under `key`.
    pub fn encoder(&self, key: &CodingKey) -> SingleRowEncoder {
        SingleRowEncoder::new(self.context.clone(), self.path.appending(key.clone()))
    }

    /// Appends a row produced by a nested encoder.
    pub fn append(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn unkeyed_container(&mut self) -> UnkeyedContainer<'_> {
        UnkeyedContainer::new(self)
    }

    fn unsupported(&self, op: &str) -> EncodeError {
        EncodeError::unsupported(op, self.path.clone())
    }
}

impl<'a> Serializer for &'a mut MultiRowEncoder {
    type Ok = ();
    type Error = EncodeError;
    type SerializeSeq = UnkeyedContainer<'a>;
    type SerializeTuple = UnkeyedContainer<'a>;
    type SerializeTupleStruct = UnkeyedContainer<'a>;
    type SerializeTupleVariant = Impossible<(), EncodeError>;
    type SerializeMap = Impossible<(), EncodeError>;
    type SerializeStruct = Impossible<(), EncodeError>;
    type SerializeStructVariant = Impossible<(), EncodeError>;

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<()> {
        value.serialize(self)
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        value: &T,
    ) -> Result<()> {
        if name == DATE_TOKEN {
            return Err(self.unsupported("serialize_newtype_struct"));
        }
        value.serialize(self)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<UnkeyedContainer<'a>> {
        Ok(UnkeyedContainer::new(self))
    }

    fn serialize_tuple(self, _len: usize) -> Result<UnkeyedContainer<'a>> {
        Ok(UnkeyedContainer::new(self))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<UnkeyedContainer<'a>> {
        Ok(UnkeyedContainer::new(self))
    }

    refuse! {
        serialize_bool(bool) -> ();
        serialize_i8(i8) -> ();
        serialize_i16(i16) -> ();
        serialize_i32(i32) -> ();
        serialize_i64(i64) -> ();
        serialize_u8(u8) -> ();
        serialize_u16(u16) -> ();
        serialize_u32(u32) -> ();
        serialize_u64(u64) -> ();
        serialize_f32(f32) -> ();
        serialize_f64(f64) -> ();
        serialize_char(char) -> ();
        serialize_str(&str) -> ();
        serialize_bytes(&[u8]) -> ();
        serialize_none() -> ();
        serialize_unit() -> ();
        serialize_unit_struct(&'static str) -> ();
        serialize_unit_variant(&'static str, u32, &'static str) -> ();
        serialize_newtype_variant<T>(&'static str, u32, &'static str, &T) -> ();
        serialize_tuple_variant(&'static str, u32, &'static str, usize) -> Self::SerializeTupleVariant;
        serialize_map(Option<usize>) -> Self::SerializeMap;
        serialize_struct(&'static str, usize) -> Self::SerializeStruct;
        serialize_struct_variant(&'static str, u32, &'static str, usize) -> Self::SerializeStructVariant;
    }
}
