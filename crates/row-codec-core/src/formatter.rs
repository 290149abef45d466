//! Pluggable date ↔ text formatting used by the `Formatted` date strategies.

use std::fmt;

use time::error::InvalidFormatDescription;
use time::format_description::well_known::Rfc3339;
use time::format_description::OwnedFormatItem;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Formats and parses dates as text.
pub trait DateFormatter: fmt::Debug + Send + Sync {
    /// Text form of `date`, or `None` if the formatter cannot represent it.
    fn format(&self, date: &OffsetDateTime) -> Option<String>;

    /// Date parsed from `text`, or `None` if it does not match the format.
    fn parse(&self, text: &str) -> Option<OffsetDateTime>;
}

/// RFC 3339 / ISO 8601 timestamps such as `2024-04-18T13:45:00Z`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Iso8601Formatter;

impl DateFormatter for Iso8601Formatter {
    fn format(&self, date: &OffsetDateTime) -> Option<String> {
        date.format(&Rfc3339).ok()
    }

    fn parse(&self, text: &str) -> Option<OffsetDateTime> {
        OffsetDateTime::parse(text, &Rfc3339).ok()
    }
}

/// Custom pattern in `time`'s format description syntax, e.g.
/// `[year]-[month]-[day] [hour]:[minute]:[second]`.
///
/// Patterns without offset components are interpreted in `offset` (UTC unless
/// set with [`PatternFormatter::with_offset`]).
#[derive(Debug, Clone)]
pub struct PatternFormatter {
    items: OwnedFormatItem,
    offset: UtcOffset,
}

impl PatternFormatter {
    pub fn new(pattern: &str) -> Result<Self, InvalidFormatDescription> {
        Ok(Self {
            items: time::format_description::parse_owned::<2>(pattern)?,
            offset: UtcOffset::UTC,
        })
    }

    pub fn with_offset(mut self, offset: UtcOffset) -> Self {
        self.offset = offset;
        self
    }
}

impl DateFormatter for PatternFormatter {
    fn format(&self, date: &OffsetDateTime) -> Option<String> {
        date.to_offset(self.offset).format(&self.items).ok()
    }

    fn parse(&self, text: &str) -> Option<OffsetDateTime> {
        if let Ok(date) = OffsetDateTime::parse(text, &self.items) {
            return Some(date);
        }
        PrimitiveDateTime::parse(text, &self.items)
            .ok()
            .map(|date| date.assume_offset(self.offset))
    }
}
