//! Scalar cell values as produced by a sheet reader

use chrono::NaiveDateTime;
use std::fmt;
use std::sync::Arc;

/// A single cell's content
///
/// Readers decide the variant; the loader only distinguishes blank from
/// non-blank and hands everything else to record decoders untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Never written
    #[default]
    Empty,
    Boolean(bool),
    /// Every numeric cell, integers included
    Number(f64),
    String(SharedString),
    /// Already decoded by the reader
    DateTime(NaiveDateTime),
    /// A formula error the reader kept as a value
    Error(CellError),
}

impl CellValue {
    pub fn string<S: AsRef<str>>(s: S) -> Self {
        Self::String(SharedString::new(s))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Empty, or text made only of whitespace
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::String(s) => s.as_str().trim().is_empty(),
            _ => false,
        }
    }

    /// Numbers as-is; booleans count as 1 and 0
    pub fn as_number(&self) -> Option<f64> {
        match *self {
            Self::Number(n) => Some(n),
            Self::Boolean(b) => Some(if b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        if let Self::String(s) = self {
            Some(s.as_str())
        } else {
            None
        }
    }

    /// Trimmed display text, or `None` when nothing is left after trimming
    pub fn text(&self) -> Option<String> {
        if self.is_blank() {
            return None;
        }
        let rendered = self.to_string();
        let trimmed = rendered.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Boolean(true) => f.write_str("TRUE"),
            Self::Boolean(false) => f.write_str("FALSE"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => f.write_str(s.as_str()),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Self::Error(e) => f.write_str(e.as_str()),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => |$v:ident| $body:expr;)*) => {
        $(impl From<$ty> for CellValue {
            fn from($v: $ty) -> Self {
                $body
            }
        })*
    };
}

impl_from! {
    bool => |b| CellValue::Boolean(b);
    i32 => |n| CellValue::Number(f64::from(n));
    i64 => |n| CellValue::Number(n as f64);
    f64 => |n| CellValue::Number(n);
    &str => |s| CellValue::string(s);
    String => |s| CellValue::string(s);
    NaiveDateTime => |dt| CellValue::DateTime(dt);
    CellError => |e| CellValue::Error(e);
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Empty, Into::into)
    }
}

/// Error codes a reader may report for a cell, such as `#REF!`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellError {
    /// `#NULL!`, ranges with no intersection
    Null,
    /// `#DIV/0!`
    Div0,
    /// `#VALUE!`, an operand of the wrong type
    Value,
    /// `#REF!`, a reference to a deleted cell
    Ref,
    /// `#NAME?`, an unknown function or name
    Name,
    /// `#NUM!`, a result out of numeric range
    Num,
    /// `#N/A`, no value available
    Na,
}

const ERROR_CODES: [(CellError, &str); 7] = [
    (CellError::Null, "#NULL!"),
    (CellError::Div0, "#DIV/0!"),
    (CellError::Value, "#VALUE!"),
    (CellError::Ref, "#REF!"),
    (CellError::Name, "#NAME?"),
    (CellError::Num, "#NUM!"),
    (CellError::Na, "#N/A"),
];

impl CellError {
    pub fn as_str(&self) -> &'static str {
        ERROR_CODES
            .iter()
            .find(|(e, _)| e == self)
            .map_or("#N/A", |(_, code)| code)
    }
}

impl fmt::Display for CellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable text shared between the grid and value streams
///
/// Grid cells are cloned whenever a stream hands a value out; `Arc<str>`
/// makes that clone a reference count bump.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SharedString(Arc<str>);

impl SharedString {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(Arc::from(s.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SharedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for SharedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SharedString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SharedString {
    fn from(s: &str) -> Self {
        Self(Arc::from(s))
    }
}

impl From<String> for SharedString {
    fn from(s: String) -> Self {
        Self(Arc::from(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_blank_is_whitespace_only() {
        for blank in [CellValue::Empty, CellValue::string(""), CellValue::string(" \t\n")] {
            assert!(blank.is_blank(), "{blank:?}");
        }
        for filled in [
            CellValue::string(" x "),
            CellValue::Number(0.0),
            CellValue::Boolean(false),
            CellValue::Error(CellError::Na),
        ] {
            assert!(!filled.is_blank(), "{filled:?}");
        }
        assert!(!CellValue::string("").is_empty());
    }

    #[test]
    fn test_text_trims_rendering() {
        assert_eq!(CellValue::string("  id ").text().as_deref(), Some("id"));
        assert_eq!(CellValue::from(7).text().as_deref(), Some("7"));
        assert_eq!(CellValue::from(2.5).text().as_deref(), Some("2.5"));
        assert_eq!(CellValue::from(true).text().as_deref(), Some("TRUE"));
        assert_eq!(CellValue::string("   ").text(), None);
        assert_eq!(CellValue::from(None::<&str>).text(), None);

        let noon = NaiveDate::from_ymd_opt(2024, 2, 29)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap();
        assert_eq!(CellValue::from(noon).to_string(), "2024-02-29 12:00:00");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(CellValue::from(false).as_number(), Some(0.0));
        assert_eq!(CellValue::from(12i64).as_number(), Some(12.0));
        assert_eq!(CellValue::string("12").as_number(), None);
        assert_eq!(CellValue::from("lvl".to_string()).as_string(), Some("lvl"));
        assert_eq!(CellValue::Number(1.0).as_string(), None);
    }

    #[test]
    fn test_error_codes() {
        for (error, code) in ERROR_CODES {
            assert_eq!(CellValue::from(error).to_string(), code);
        }
        let div0 = CellValue::from(CellError::Div0);
        assert_eq!(div0.text().as_deref(), Some("#DIV/0!"));
    }
}
