//! Date support for serde-driven types.
//!
//! Serde has no date in its data model. Dates therefore travel as a newtype
//! struct with the reserved name [`DATE_TOKEN`] wrapping RFC 3339 text. Row
//! serializers and deserializers recognize the token and apply their date
//! strategy; any other serde format just sees the RFC 3339 string.
//!
//! Use the [`Date`] wrapper, or keep a plain `OffsetDateTime` field and
//! annotate it with `#[serde(with = "row_codec::date")]` (or
//! `row_codec::date::option` for `Option<OffsetDateTime>`).

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::ser::{self, Serializer};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Newtype-struct name marking a date in the serde data model.
pub const DATE_TOKEN: &str = "$row_codec::private::Date";

/// Text carried inside the date token.
pub fn token_text(date: &OffsetDateTime) -> Option<String> {
    date.format(&Rfc3339).ok()
}

/// Parses text carried inside the date token.
pub fn parse_token_text(text: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(text, &Rfc3339).ok()
}

/// An `OffsetDateTime` that row encoders and decoders route through their
/// date strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Date(pub OffsetDateTime);

impl Date {
    pub fn into_inner(self) -> OffsetDateTime {
        self.0
    }
}

impl From<OffsetDateTime> for Date {
    fn from(date: OffsetDateTime) -> Self {
        Date(date)
    }
}

impl From<Date> for OffsetDateTime {
    fn from(date: Date) -> Self {
        date.0
    }
}

struct TokenText<'a>(&'a OffsetDateTime);

impl Serialize for TokenText<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let text = token_text(self.0)
            .ok_or_else(|| ser::Error::custom("date is outside the RFC 3339 range"))?;
        serializer.serialize_str(&text)
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize(deserializer).map(Date)
    }
}

struct DateVisitor;

impl<'de> Visitor<'de> for DateVisitor {
    type Value = OffsetDateTime;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an RFC 3339 timestamp")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<OffsetDateTime, E> {
        parse_token_text(v).ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
    }

    fn visit_newtype_struct<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> Result<OffsetDateTime, D::Error> {
        deserializer.deserialize_str(self)
    }
}

/// `serialize_with` helper for `OffsetDateTime` fields.
pub fn serialize<S: Serializer>(date: &OffsetDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_newtype_struct(DATE_TOKEN, &TokenText(date))
}

/// `deserialize_with` helper for `OffsetDateTime` fields.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<OffsetDateTime, D::Error> {
    deserializer.deserialize_newtype_struct(DATE_TOKEN, DateVisitor)
}

/// Helpers for `Option<OffsetDateTime>` fields.
pub mod option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use time::OffsetDateTime;

    use super::Date;

    pub fn serialize<S: Serializer>(
        date: &Option<OffsetDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        date.map(Date).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<OffsetDateTime>, D::Error> {
        Ok(Option::<Date>::deserialize(deserializer)?.map(Date::into_inner))
    }
}
