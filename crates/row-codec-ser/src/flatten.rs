//! Detection of values that flatten to nothing.
//!
//! A row array skips elements that are `None`, however deeply the option is
//! nested (`Some(None)` included). Whether a value is absent is found by
//! serializing it into a serializer that only answers that question.

use row_codec_core::{CodingPath, DATE_TOKEN};
use serde::ser::{Impossible, Serialize, Serializer};

use crate::error::{EncodeError, Result};

pub(crate) fn is_absent<T: Serialize + ?Sized>(value: &T) -> bool {
    value.serialize(Absent).unwrap_or(false)
}

struct Absent;

impl Absent {
    fn unsupported(&self, op: &str) -> EncodeError {
        EncodeError::unsupported(op, CodingPath::root())
    }
}

macro_rules! present {
    ($($method:ident $(<$g:ident>)? ($($ty:ty),*);)*) => {
        $(
            fn $method $(<$g: ?Sized + Serialize>)? (self, $(_: $ty),*) -> Result<bool> {
                Ok(false)
            }
        )*
    };
}

impl Serializer for Absent {
    type Ok = bool;
    type Error = EncodeError;
    type SerializeSeq = Impossible<bool, EncodeError>;
    type SerializeTuple = Impossible<bool, EncodeError>;
    type SerializeTupleStruct = Impossible<bool, EncodeError>;
    type SerializeTupleVariant = Impossible<bool, EncodeError>;
    type SerializeMap = Impossible<bool, EncodeError>;
    type SerializeStruct = Impossible<bool, EncodeError>;
    type SerializeStructVariant = Impossible<bool, EncodeError>;

    fn serialize_none(self) -> Result<bool> {
        Ok(true)
    }

    fn serialize_some<T: Serialize + ?Sized>(self, value: &T) -> Result<bool> {
        value.serialize(self)
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        value: &T,
    ) -> Result<bool> {
        if name == DATE_TOKEN {
            return Ok(false);
        }
        value.serialize(self)
    }

    present! {
        serialize_bool(bool);
        serialize_i8(i8);
        serialize_i16(i16);
        serialize_i32(i32);
        serialize_i64(i64);
        serialize_u8(u8);
        serialize_u16(u16);
        serialize_u32(u32);
        serialize_u64(u64);
        serialize_f32(f32);
        serialize_f64(f64);
        serialize_char(char);
        serialize_str(&str);
        serialize_bytes(&[u8]);
        serialize_unit();
        serialize_unit_struct(&'static str);
        serialize_unit_variant(&'static str, u32, &'static str);
        serialize_newtype_variant<T>(&'static str, u32, &'static str, &T);
    }

    // Compound values are present; refusing them stops the check early.
    refuse! {
        serialize_seq(Option<usize>) -> Self::SerializeSeq;
        serialize_tuple(usize) -> Self::SerializeTuple;
        serialize_tuple_struct(&'static str, usize) -> Self::SerializeTupleStruct;
        serialize_tuple_variant(&'static str, u32, &'static str, usize) -> Self::SerializeTupleVariant;
        serialize_map(Option<usize>) -> Self::SerializeMap;
        serialize_struct(&'static str, usize) -> Self::SerializeStruct;
        serialize_struct_variant(&'static str, u32, &'static str, usize) -> Self::SerializeStructVariant;
    }
}
