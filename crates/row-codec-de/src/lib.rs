//! Serde deserializers that read native values out of rows.
//!
//! Three decoders cover the possible inputs:
//!
//! - [`SingleValueDecoder`] reads one [`Cell`](row_codec_core::Cell).
//! - [`SingleRowDecoder`] reads a struct, map or tuple from the columns of a
//!   [`Row`](row_codec_core::Row).
//! - [`MultiRowDecoder`] reads a sequence from a slice of rows, one element
//!   per row.
//!
//! Nesting is limited to those shapes. Requests a decoder cannot satisfy fail
//! with a [`DecodeError`] carrying the coding path of the offending value.

mod date;
mod decoder;
mod error;
mod keyed;
mod multi_row;
mod single_row;
mod single_value;
mod slot;
mod unkeyed;

pub use date::DateDecodingStrategy;
pub use decoder::RowDecoding;
pub use error::{Context, DecodeError, Result};
pub use keyed::KeyedContainer;
pub use multi_row::MultiRowDecoder;
pub use single_row::SingleRowDecoder;
pub use single_value::SingleValueDecoder;
pub use unkeyed::UnkeyedContainer;

use row_codec_core::UserInfo;

/// Settings shared by every decoder of one top-level decode call.
#[derive(Debug, Clone, Default)]
pub struct DecodeContext {
    pub date_strategy: DateDecodingStrategy,
    pub user_info: UserInfo,
}
