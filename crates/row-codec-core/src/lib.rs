//! Row and cell primitives shared by the row-codec encoder and decoder.
//!
//! - [`Cell`]: the atomic stored value (null, integer, real, text, blob).
//! - [`Row`]: an insertion-ordered column → cell mapping.
//! - [`CodingKey`] / [`CodingPath`]: addressing and diagnostics.
//! - [`FromCell`] / [`ToCell`]: scalar coercion checks.
//! - [`DateFormatter`]: pluggable date text formats.

mod cell;
mod coding_key;
mod convert;
mod formatter;
mod row;
mod user_info;

pub mod date;

pub use cell::Cell;
pub use coding_key::{CodingKey, CodingPath};
pub use convert::{
    date_from_millis, date_from_seconds, millis_since_epoch, seconds_since_epoch, FromCell, ToCell,
};
pub use date::{Date, DATE_TOKEN};
pub use formatter::{DateFormatter, Iso8601Formatter, PatternFormatter};
pub use row::Row;
pub use user_info::UserInfo;

pub use time::OffsetDateTime;
