//! Coercion between [`Cell`] and native scalar types.
//!
//! Both directions are checks: they report `None` instead of failing, and the
//! caller turns that into an error carrying its coding path.

use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

use crate::Cell;

/// Scalar types that can be read out of a single cell.
pub trait FromCell: Sized {
    /// Type name used in mismatch diagnostics.
    const EXPECTED: &'static str;

    fn from_cell(cell: &Cell) -> Option<Self>;
}

/// Scalar types that can be stored in a single cell.
pub trait ToCell {
    /// `None` when the value has no exact cell representation.
    fn to_cell(&self) -> Option<Cell>;
}

macro_rules! int_coercion {
    ($($t:ty => $name:literal),* $(,)?) => {
        $(
            impl FromCell for $t {
                const EXPECTED: &'static str = $name;

                fn from_cell(cell: &Cell) -> Option<Self> {
                    match cell {
                        Cell::Integer(v) => <$t>::try_from(*v).ok(),
                        _ => None,
                    }
                }
            }

            impl ToCell for $t {
                fn to_cell(&self) -> Option<Cell> {
                    i64::try_from(*self).ok().map(Cell::Integer)
                }
            }
        )*
    };
}

int_coercion!(
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    isize => "isize",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    usize => "usize",
);

impl FromCell for bool {
    const EXPECTED: &'static str = "bool";

    fn from_cell(cell: &Cell) -> Option<Self> {
        match cell {
            Cell::Integer(v) => Some(*v != 0),
            _ => None,
        }
    }
}

impl ToCell for bool {
    fn to_cell(&self) -> Option<Cell> {
        Some(Cell::Integer(i64::from(*self)))
    }
}

impl FromCell for f64 {
    const EXPECTED: &'static str = "f64";

    fn from_cell(cell: &Cell) -> Option<Self> {
        match cell {
            Cell::Real(v) => Some(*v),
            Cell::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }
}

impl ToCell for f64 {
    fn to_cell(&self) -> Option<Cell> {
        Some(Cell::Real(*self))
    }
}

impl FromCell for f32 {
    const EXPECTED: &'static str = "f32";

    fn from_cell(cell: &Cell) -> Option<Self> {
        f64::from_cell(cell).map(|v| v as f32)
    }
}

impl ToCell for f32 {
    fn to_cell(&self) -> Option<Cell> {
        Some(Cell::Real(f64::from(*self)))
    }
}

impl FromCell for String {
    const EXPECTED: &'static str = "String";

    fn from_cell(cell: &Cell) -> Option<Self> {
        cell.as_text().map(str::to_owned)
    }
}

impl ToCell for String {
    fn to_cell(&self) -> Option<Cell> {
        Some(Cell::Text(self.clone()))
    }
}

impl ToCell for str {
    fn to_cell(&self) -> Option<Cell> {
        Some(Cell::Text(self.to_owned()))
    }
}

impl FromCell for char {
    const EXPECTED: &'static str = "char";

    fn from_cell(cell: &Cell) -> Option<Self> {
        let mut chars = cell.as_text()?.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

impl ToCell for char {
    fn to_cell(&self) -> Option<Cell> {
        Some(Cell::Text(self.to_string()))
    }
}

impl FromCell for Vec<u8> {
    const EXPECTED: &'static str = "Vec<u8>";

    fn from_cell(cell: &Cell) -> Option<Self> {
        cell.as_blob().map(<[u8]>::to_vec)
    }
}

impl ToCell for Vec<u8> {
    fn to_cell(&self) -> Option<Cell> {
        Some(Cell::Blob(self.clone()))
    }
}

impl ToCell for [u8] {
    fn to_cell(&self) -> Option<Cell> {
        Some(Cell::Blob(self.to_vec()))
    }
}

impl FromCell for Cell {
    const EXPECTED: &'static str = "Cell";

    fn from_cell(cell: &Cell) -> Option<Self> {
        Some(cell.clone())
    }
}

impl ToCell for Cell {
    fn to_cell(&self) -> Option<Cell> {
        Some(self.clone())
    }
}

/// Native date representation: RFC 3339 text on the way in, and text,
/// integer seconds or real seconds since the Unix epoch on the way out.
impl FromCell for OffsetDateTime {
    const EXPECTED: &'static str = "OffsetDateTime";

    fn from_cell(cell: &Cell) -> Option<Self> {
        match cell {
            Cell::Text(s) => OffsetDateTime::parse(s, &Rfc3339).ok(),
            Cell::Integer(secs) => OffsetDateTime::from_unix_timestamp(*secs).ok(),
            Cell::Real(secs) => date_from_seconds(*secs),
            _ => None,
        }
    }
}

impl ToCell for OffsetDateTime {
    fn to_cell(&self) -> Option<Cell> {
        self.format(&Rfc3339).ok().map(Cell::Text)
    }
}

impl<T: ToCell + ?Sized> ToCell for &T {
    fn to_cell(&self) -> Option<Cell> {
        (**self).to_cell()
    }
}

/// Builds a date from fractional seconds since the Unix epoch.
///
/// The fraction is rounded to whole microseconds. A present-day timestamp in
/// an `f64` of seconds is only accurate to a few hundred nanoseconds, so finer
/// digits would be noise.
pub fn date_from_seconds(secs: f64) -> Option<OffsetDateTime> {
    if !secs.is_finite() || secs.abs() >= i64::MAX as f64 {
        return None;
    }
    let whole = secs.floor();
    let micros = ((secs - whole) * 1_000_000.0).round() as i64;
    OffsetDateTime::from_unix_timestamp(whole as i64)
        .ok()?
        .checked_add(Duration::microseconds(micros))
}

/// Fractional seconds since the Unix epoch.
pub fn seconds_since_epoch(date: &OffsetDateTime) -> f64 {
    date.unix_timestamp() as f64 + f64::from(date.nanosecond()) / 1_000_000_000.0
}

/// Builds a date from fractional milliseconds since the Unix epoch.
///
/// Whole milliseconds are taken exactly; the fraction is rounded to whole
/// nanoseconds.
pub fn date_from_millis(millis: f64) -> Option<OffsetDateTime> {
    if !millis.is_finite() || millis.abs() >= i64::MAX as f64 {
        return None;
    }
    let whole = millis.floor();
    let nanos = ((millis - whole) * 1_000_000.0).round() as i128;
    OffsetDateTime::from_unix_timestamp_nanos(whole as i128 * 1_000_000 + nanos).ok()
}

/// Fractional milliseconds since the Unix epoch. Whole milliseconds are exact.
pub fn millis_since_epoch(date: &OffsetDateTime) -> f64 {
    let nanos = date.unix_timestamp_nanos();
    (nanos / 1_000_000) as f64 + (nanos % 1_000_000) as f64 / 1_000_000.0
}
