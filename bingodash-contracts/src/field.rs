use bingodash_model::chrono::{DateTime, SecondsFormat, Utc};
use std::borrow::Cow;

/// A single cell value extracted from a record for sorting and rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Null,
    Text(Cow<'a, str>),
    Number(f64),
    Flag(bool),
    Time(DateTime<Utc>),
}

impl<'a> FieldValue<'a> {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// String representation used for rendering and for the comparator's
    /// fallback path.
    pub fn render(&self) -> Cow<'a, str> {
        match self {
            FieldValue::Null => Cow::Borrowed(""),
            FieldValue::Text(text) => text.clone(),
            FieldValue::Number(n) if n.fract() == 0.0 && n.is_finite() => {
                Cow::Owned(format!("{n:.0}"))
            }
            FieldValue::Number(n) => Cow::Owned(n.to_string()),
            FieldValue::Flag(flag) => Cow::Borrowed(if *flag {
                "true"
            } else {
                "false"
            }),
            FieldValue::Time(at) => {
                Cow::Owned(at.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
        }
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        FieldValue::Text(Cow::Borrowed(value))
    }
}

impl From<String> for FieldValue<'_> {
    fn from(value: String) -> Self {
        FieldValue::Text(Cow::Owned(value))
    }
}

impl<'a> From<Option<&'a str>> for FieldValue<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::from)
    }
}

impl From<u32> for FieldValue<'_> {
    fn from(value: u32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<Option<u32>> for FieldValue<'_> {
    fn from(value: Option<u32>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::from)
    }
}

impl From<f64> for FieldValue<'_> {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<bool> for FieldValue<'_> {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<DateTime<Utc>> for FieldValue<'_> {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Time(value)
    }
}

/// Named-column access over a record.
///
/// Unknown columns yield [`FieldValue::Null`], so a misspelled sort key
/// degrades to "everything equal" instead of failing.
pub trait FieldAccess {
    fn field(&self, column: &str) -> FieldValue<'_>;
}
