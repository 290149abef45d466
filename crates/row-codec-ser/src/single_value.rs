//! Encoder producing exactly one cell.

use row_codec_core::{Cell, CodingPath, OffsetDateTime, ToCell, DATE_TOKEN};
use serde::ser::{Impossible, Serialize, Serializer};

use crate::date::capture_date;
use crate::error::{EncodeError, Result};
use crate::EncodeContext;

/// Holds the cell for one column. The last write wins.
#[derive(Debug, Clone)]
pub struct SingleValueEncoder {
    context: EncodeContext,
    path: CodingPath,
    cell: Option<Cell>,
}

impl SingleValueEncoder {
    pub fn new(context: EncodeContext, path: CodingPath) -> Self {
        Self {
            context,
            path,
            cell: None,
        }
    }

    pub fn coding_path(&self) -> &CodingPath {
        &self.path
    }

    pub fn context(&self) -> &EncodeContext {
        &self.context
    }

    /// The written cell, if any.
    pub fn cell(&self) -> Option<&Cell> {
        self.cell.as_ref()
    }

    pub fn into_cell(self) -> Option<Cell> {
        self.cell
    }

    pub fn encode_nil(&mut self) {
        self.cell = Some(Cell::Null);
    }

    pub fn encode<T: ToCell + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.cell = Some(to_cell(value, &self.path)?);
        Ok(())
    }

    /// Encodes a date through the configured date strategy.
    pub fn encode_date(&mut self, date: &OffsetDateTime) -> Result<()> {
        self.cell = Some(self.context.date_strategy.encode(date, &self.path)?);
        Ok(())
    }

    fn unsupported(&self, op: &str) -> EncodeError {
        EncodeError::unsupported(op, self.path.clone())
    }
}

pub(crate) fn to_cell<T: ToCell + ?Sized>(value: &T, path: &CodingPath) -> Result<Cell> {
    value.to_cell().ok_or_else(|| {
        EncodeError::invalid_value(
            std::any::type_name::<T>(),
            path.clone(),
            "Value is out of range for an integer cell.",
        )
    })
}

macro_rules! encode_scalars {
    ($($method:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method(self, v: $ty) -> Result<()> {
                self.encode(&v)
            }
        )*
    };
}

impl<'a> Serializer for &'a mut SingleValueEncoder {
    type Ok = ();
    type Error = EncodeError;
    type SerializeSeq = Impossible<(), EncodeError>;
    type SerializeTuple = Impossible<(), EncodeError>;
    type SerializeTupleStruct = Impossible<(), EncodeError>;
    type SerializeTupleVariant = Impossible<(), EncodeError>;
    type SerializeMap = Impossible<(), EncodeError>;
    type SerializeStruct = Impossible<(), EncodeError>;
    type SerializeStructVariant = Impossible<(), EncodeError>;

    encode_scalars! {
        serialize_bool(bool),
        serialize_i8(i8),
        serialize_i16(i16),
        serialize_i32(i32),
        serialize_i64(i64),
        serialize_u8(u8),
        serialize_u16(u16),
        serialize_u32(u32),
        serialize_u64(u64),
        serialize_f32(f32),
        serialize_f64(f64),
        serialize_char(char),
        serialize_str(&str),
        serialize_bytes(&[u8]),
    }

    fn serialize_none(self) -> Result<()> {
        self.encode_nil();
        Ok(())
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<()> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        self.encode_nil();
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        self.serialize_unit()
    }

    /// Unit variants are stored as their name.
    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        self.encode(variant)
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        value: &T,
    ) -> Result<()> {
        if name == DATE_TOKEN {
            let date = capture_date(value, &self.path)?;
            return self.encode_date(&date);
        }
        value.serialize(self)
    }

    refuse! {
        serialize_newtype_variant<T>(&'static str, u32, &'static str, &T) -> ();
        serialize_seq(Option<usize>) -> Self::SerializeSeq;
        serialize_tuple(usize) -> Self::SerializeTuple;
        serialize_tuple_struct(&'static str, usize) -> Self::SerializeTupleStruct;
        serialize_tuple_variant(&'static str, u32, &'static str, usize) -> Self::SerializeTupleVariant;
        serialize_map(Option<usize>) -> Self::SerializeMap;
        serialize_struct(&'static str, usize) -> Self::SerializeStruct;
        serialize_struct_variant(&'static str, u32, &'static str, usize) -> Self::SerializeStructVariant;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use row_codec_core::Date;
    use time::macros::datetime;

    fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Option<Cell>> {
        let mut encoder = SingleValueEncoder::new(EncodeContext::default(), CodingPath::root().appending("v"));
        value.serialize(&mut encoder)?;
        Ok(encoder.into_cell())
    }

    #[test]
    fn scalars_become_cells() {
        assert_eq!(encode(&true), Ok(Some(Cell::Integer(1))));
        assert_eq!(encode(&-3i16), Ok(Some(Cell::Integer(-3))));
        assert_eq!(encode(&1.5f32), Ok(Some(Cell::Real(1.5))));
        assert_eq!(encode("txt"), Ok(Some(Cell::from("txt"))));
        assert_eq!(encode(&'c'), Ok(Some(Cell::from("c"))));
        assert_eq!(encode(&None::<i64>), Ok(Some(Cell::Null)));
        assert_eq!(encode(&Some(4u8)), Ok(Some(Cell::Integer(4))));
        assert_eq!(encode(&()), Ok(Some(Cell::Null)));
    }

    #[test]
    fn u64_beyond_i64_is_invalid() {
        let err = encode(&u64::MAX).unwrap_err();
        assert!(matches!(err, EncodeError::InvalidValue { ref value, .. } if value == "u64"));
        assert_eq!(err.coding_path().to_string(), "[v]");
    }

    #[test]
    fn dates_use_the_strategy() {
        let date = Date(datetime!(2001-09-09 01:46:40 UTC));
        assert_eq!(encode(&date), Ok(Some(Cell::from("2001-09-09T01:46:40Z"))));
    }

    #[test]
    fn compound_values_are_refused() {
        let err = encode(&vec![1, 2]).unwrap_err();
        assert_eq!(
            err.context().debug_description,
            "`serialize_seq` is not supported for this encoding path."
        );
        assert_eq!(err.coding_path().to_string(), "[v]");
    }

    #[test]
    fn nothing_written_leaves_no_cell() {
        let encoder = SingleValueEncoder::new(EncodeContext::default(), CodingPath::root());
        assert_eq!(encoder.cell(), None);
    }
}
