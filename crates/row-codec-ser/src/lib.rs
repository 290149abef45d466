//! Serde serializers that store native values as rows.
//!
//! - [`SingleValueEncoder`] produces one [`Cell`](row_codec_core::Cell).
//! - [`SingleRowEncoder`] produces a [`Row`](row_codec_core::Row) from a
//!   struct or map, one column per field.
//! - [`MultiRowEncoder`] produces one row per element of a sequence. Elements
//!   that are `None` are skipped.
//!
//! Shapes outside those fail immediately with an [`EncodeError`] naming the
//! refused serializer call and its coding path.

// Serializer methods an encoder refuses. Each expansion site provides an
// inherent `unsupported(&self, op)` building the error.
macro_rules! refuse {
    ($($method:ident $(<$g:ident>)? ($($ty:ty),*) -> $ret:ty;)*) => {
        $(
            fn $method $(<$g: ?Sized + serde::Serialize>)? (self, $(_: $ty),*)
                -> ::std::result::Result<$ret, Self::Error>
            {
                Err(self.unsupported(stringify!($method)))
            }
        )*
    };
}

mod date;
mod error;
mod flatten;
mod keyed;
mod multi_row;
mod single_row;
mod single_value;
mod unkeyed;

pub use date::DateEncodingStrategy;
pub use error::{Context, EncodeError, Result};
pub use keyed::KeyedContainer;
pub use multi_row::MultiRowEncoder;
pub use single_row::SingleRowEncoder;
pub use single_value::SingleValueEncoder;
pub use unkeyed::UnkeyedContainer;

use row_codec_core::UserInfo;

/// Settings shared by every encoder of one top-level encode call.
#[derive(Debug, Clone, Default)]
pub struct EncodeContext {
    pub date_strategy: DateEncodingStrategy,
    pub user_info: UserInfo,
}
