//! Encoder producing one row.

use row_codec_core::{Cell, CodingKey, CodingPath, OffsetDateTime, Row, ToCell};
use serde::ser::{Impossible, Serialize, Serializer};

use crate::error::{EncodeError, Result};
use crate::keyed::KeyedContainer;
use crate::single_value::{to_cell, SingleValueEncoder};
use crate::EncodeContext;

/// Accumulates the columns of one row from a struct or map.
#[derive(Debug, Clone)]
pub struct SingleRowEncoder {
    context: EncodeContext,
    path: CodingPath,
    row: Row,
}

impl SingleRowEncoder {
    pub fn new(context: EncodeContext, path: CodingPath) -> Self {
        Self {
            context,
            path,
            row: Row::new(),
        }
    }

    pub fn coding_path(&self) -> &CodingPath {
        &self.path
    }

    pub fn context(&self) -> &EncodeContext {
        &self.context
    }

    /// Number of columns written so far.
    pub fn count(&self) -> usize {
        self.row.len()
    }

    pub fn row(&self) -> &Row {
        &self.row
    }

    pub fn into_row(self) -> Row {
        self.row
    }

    pub fn encode_nil(&mut self, key: &CodingKey) {
        self.row.set_by_key(key, Cell::Null);
    }

    pub fn encode<T: ToCell + ?Sized>(&mut self, value: &T, key: &CodingKey) -> Result<()> {
        let cell = to_cell(value, &self.path.appending(key.clone()))?;
        self.row.set_by_key(key, cell);
        Ok(())
    }

    /// Encodes a date through the configured date strategy.
    pub fn encode_date(&mut self, date: &OffsetDateTime, key: &CodingKey) -> Result<()> {
        let cell = self
            .context
            .date_strategy
            .encode(date, &self.path.appending(key.clone()))?;
        self.row.set_by_key(key, cell);
        Ok(())
    }

    /// Fresh encoder for the value under `key`.
    pub fn encoder(&self, key: &CodingKey) -> SingleValueEncoder {
        SingleValueEncoder::new(self.context.clone(), self.path.appending(key.clone()))
    }

    /// Stores what a nested encoder produced.
    pub fn set(&mut self, cell: Option<Cell>, key: &CodingKey) -> Result<()> {
        let cell = cell.ok_or_else(|| {
            EncodeError::invalid_value(
                "nothing",
                self.path.appending(key.clone()),
                "The nested encoder produced no cell.",
            )
        })?;
        self.row.set_by_key(key, cell);
        Ok(())
    }

    pub fn keyed_container(&mut self) -> KeyedContainer<'_> {
        KeyedContainer::new(self)
    }

    fn unsupported(&self, op: &str) -> EncodeError {
        EncodeError::unsupported(op, self.path.clone())
    }
}

impl<'a> Serializer for &'a mut SingleRowEncoder {
    type Ok = ();
    type Error = EncodeError;
    type SerializeSeq = Impossible<(), EncodeError>;
    type SerializeTuple = Impossible<(), EncodeError>;
    type SerializeTupleStruct = Impossible<(), EncodeError>;
    type SerializeTupleVariant = Impossible<(), EncodeError>;
    type SerializeMap = KeyedContainer<'a>;
    type SerializeStruct = KeyedContainer<'a>;
    type SerializeStructVariant = Impossible<(), EncodeError>;

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<()> {
        value.serialize(self)
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        value: &T,
    ) -> Result<()> {
        if name == row_codec_core::DATE_TOKEN {
            return Err(self.unsupported("serialize_newtype_struct"));
        }
        value.serialize(self)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<KeyedContainer<'a>> {
        Ok(KeyedContainer::new(self))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<KeyedContainer<'a>> {
        Ok(KeyedContainer::new(self))
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
        serialize_seq(Option<usize>) -> Self::SerializeSeq;
        serialize_tuple(usize) -> Self::SerializeTuple;
        serialize_tuple_struct(&'static str, usize) -> Self::SerializeTupleStruct;
        serialize_tuple_variant(&'static str, u32, &'static str, usize) -> Self::SerializeTupleVariant;
        serialize_struct_variant(&'static str, u32, &'static str, usize) -> Self::SerializeStructVariant;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct User<'a> {
        id: i64,
        name: &'a str,
        nickname: Option<&'a str>,
    }

    fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Row> {
        let mut encoder = SingleRowEncoder::new(EncodeContext::default(), CodingPath::root());
        value.serialize(&mut encoder)?;
        Ok(encoder.into_row())
    }

    #[test]
    fn struct_fields_become_columns_in_order() {
        let row = encode(&User {
            id: 7,
            name: "Ada",
            nickname: None,
        })
        .unwrap();
        assert_eq!(row.columns().collect::<Vec<_>>(), ["id", "name", "nickname"]);
        assert_eq!(row["id"], Cell::Integer(7));
        assert_eq!(row["name"], Cell::from("Ada"));
        assert_eq!(row["nickname"], Cell::Null);
    }

    #[test]
    fn maps_become_rows() {
        let map: BTreeMap<&str, f64> = [("a", 1.0), ("b", 2.5)].into_iter().collect();
        let row = encode(&map).unwrap();
        assert_eq!(row.get("b"), Some(&Cell::Real(2.5)));
    }

    #[test]
    fn nested_containers_fail_at_the_field() {
        #[derive(Serialize)]
        struct Tagged {
            tags: Vec<String>,
        }
        let err = encode(&Tagged { tags: vec![] }).unwrap_err();
        assert_eq!(err.coding_path().to_string(), "[tags]");
    }

    #[test]
    fn scalars_and_sequences_are_refused_at_row_level() {
        let err = encode(&5i32).unwrap_err();
        assert_eq!(
            err.context().debug_description,
            "`serialize_i32` is not supported for this encoding path."
        );
        assert!(encode(&[1, 2]).is_err());
        assert!(encode(&None::<User>).is_err());
    }

    #[test]
    fn direct_encoding_by_key() {
        let mut encoder = SingleRowEncoder::new(EncodeContext::default(), CodingPath::root());
        encoder.encode(&3u8, &CodingKey::from("n")).unwrap();
        encoder.encode_nil(&CodingKey::from("gone"));
        encoder.encode(&"x", &CodingKey::Index(0)).unwrap();
        assert_eq!(encoder.count(), 2);
        assert_eq!(encoder.row()["n"], Cell::from("x"));

        let err = encoder.set(None, &CodingKey::from("m")).unwrap_err();
        assert_eq!(err.coding_path().to_string(), "[m]");

        let err = encoder.encode(&u64::MAX, &CodingKey::from("big")).unwrap_err();
        assert_eq!(err.coding_path().to_string(), "[big]");
    }
}
