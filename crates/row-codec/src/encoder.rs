use std::any::type_name;

use row_codec_core::{CodingPath, Row, UserInfo};
use row_codec_ser::{DateEncodingStrategy, EncodeContext, EncodeError, MultiRowEncoder, SingleRowEncoder};
use serde::ser::Serialize;

/// Encodes serde types into rows.
///
/// Mirrors [`RowDecoder`](crate::RowDecoder): settings are fixed per encoder
/// and shared by every nested encoder of a call.
#[derive(Debug, Clone, Default)]
pub struct RowEncoder {
    context: EncodeContext,
}

impl RowEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_strategy(mut self, strategy: DateEncodingStrategy) -> Self {
        self.context.date_strategy = strategy;
        self
    }

    pub fn with_user_info(mut self, user_info: UserInfo) -> Self {
        self.context.user_info = user_info;
        self
    }

    pub fn date_strategy(&self) -> &DateEncodingStrategy {
        &self.context.date_strategy
    }

    pub fn user_info(&self) -> &UserInfo {
        &self.context.user_info
    }

    /// Encodes a struct or map as one row.
    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Row, EncodeError> {
        tracing::trace!(
            value_type = type_name::<T>(),
            strategy = ?self.context.date_strategy,
            "encoding row"
        );
        let mut encoder = SingleRowEncoder::new(self.context.clone(), CodingPath::root());
        match value.serialize(&mut encoder) {
            Ok(()) => Ok(encoder.into_row()),
            Err(err) => {
                tracing::debug!(%err, value_type = type_name::<T>(), "row encode failed");
                Err(err)
            }
        }
    }

    /// Encodes one row per element. `None` elements produce no row.
    pub fn encode_many<T: Serialize>(&self, values: &[T]) -> Result<Vec<Row>, EncodeError> {
        tracing::trace!(
            elements = values.len(),
            value_type = type_name::<T>(),
            strategy = ?self.context.date_strategy,
            "encoding rows"
        );
        let mut encoder = MultiRowEncoder::new(self.context.clone(), CodingPath::root());
        match values.serialize(&mut encoder) {
            Ok(()) => Ok(encoder.into_rows()),
            Err(err) => {
                tracing::debug!(%err, value_type = type_name::<T>(), "rows encode failed");
                Err(err)
            }
        }
    }
}

/// Encodes `value` with the default settings.
pub fn to_row<T: Serialize + ?Sized>(value: &T) -> Result<Row, EncodeError> {
    RowEncoder::new().encode(value)
}

/// Encodes `values` with the default settings.
pub fn to_rows<T: Serialize>(values: &[T]) -> Result<Vec<Row>, EncodeError> {
    RowEncoder::new().encode_many(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use row_codec_core::Cell;
    use serde::Serialize;
    use std::collections::HashMap;

    #[derive(Serialize)]
    struct Tag {
        name: &'static str,
        weight: Option<f64>,
    }

    #[test]
    fn struct_becomes_one_row() {
        let row = to_row(&Tag {
            name: "rust",
            weight: None,
        })
        .unwrap();
        assert_eq!(row.columns().collect::<Vec<_>>(), ["name", "weight"]);
        assert_eq!(row["weight"], Cell::Null);
    }

    #[test]
    fn maps_become_rows() {
        let map: HashMap<&str, i32> = [("a", 1)].into_iter().collect();
        let row = to_row(&map).unwrap();
        assert_eq!(row["a"], Cell::Integer(1));
    }

    #[test]
    fn absent_elements_produce_no_row() {
        let tags = [
            Some(Tag {
                name: "a",
                weight: Some(1.0),
            }),
            None,
        ];
        let rows = to_rows(&tags).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["weight"], Cell::Real(1.0));
    }

    #[test]
    fn scalars_are_not_rows() {
        let err = to_row(&5i32).unwrap_err();
        assert!(err.coding_path().is_empty());
        let err = to_rows(&[1, 2]).unwrap_err();
        assert_eq!(err.coding_path().to_string(), "[Index 0]");
    }

    #[test]
    fn encoder_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RowEncoder>();
    }
}
