//! Maps serde types onto database rows.
//!
//! A [`Row`] is an ordered set of named [`Cell`]s. Structs and maps become
//! one row, sequences of structs become one row per element, and every field
//! collapses into a single cell:
//!
//! ```
//! use row_codec::{from_row, to_row, Cell};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct User {
//!     id: i64,
//!     name: String,
//! }
//!
//! let user = User { id: 123, name: "John Doe".into() };
//! let row = to_row(&user).unwrap();
//! assert_eq!(row["id"], Cell::Integer(123));
//! assert_eq!(from_row::<User>(&row).unwrap(), user);
//! ```
//!
//! Dates need a hint because serde has no date type: wrap the field in
//! [`Date`] or annotate it with `#[serde(with = "row_codec::date")]`. Byte
//! vectors likewise use `#[serde(with = "row_codec::blob")]` to land in a
//! blob cell.
//!
//! The engines behind the entry points live in [`de`] and [`ser`] for
//! callers that need to drive a decoder or encoder directly.

pub mod blob;
mod decoder;
mod encoder;

pub use decoder::{from_row, from_rows, RowDecoder};
pub use encoder::{to_row, to_rows, RowEncoder};

pub use row_codec_core::date;
pub use row_codec_core::{
    Cell, CodingKey, CodingPath, Date, DateFormatter, FromCell, Iso8601Formatter, OffsetDateTime,
    PatternFormatter, Row, ToCell, UserInfo,
};
pub use row_codec_de::{DateDecodingStrategy, DecodeError};
pub use row_codec_ser::{DateEncodingStrategy, EncodeError};

/// Row and cell deserializers.
pub mod de {
    pub use row_codec_de::*;
}

/// Row and cell serializers.
pub mod ser {
    pub use row_codec_ser::*;
}
