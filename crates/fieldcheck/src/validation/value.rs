use crate::JsonValue;
use std::{borrow::Cow, fmt};

/// A loosely-typed scalar submitted for a form field.
///
/// Rules inspect the textual form of the value, so numbers are formatted with
/// their `Display` representation before checking.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FieldValue<'a> {
    /// The field was not submitted.
    #[default]
    Absent,
    /// A text value.
    Text(Cow<'a, str>),
    /// An integer value.
    Integer(i64),
    /// A floating-point value.
    Float(f64),
}

impl FieldValue<'_> {
    /// Returns `true` if the value is absent or a zero-length text.
    #[inline]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Text(s) => s.is_empty(),
            Self::Integer(_) | Self::Float(_) => false,
        }
    }

    /// Returns the textual form of the value.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Self::Absent => Cow::Borrowed(""),
            Self::Text(s) => Cow::Borrowed(s.as_ref()),
            Self::Integer(i) => Cow::Owned(i.to_string()),
            Self::Float(f) => Cow::Owned(f.to_string()),
        }
    }

    /// Returns the number of characters in the textual form.
    #[inline]
    pub fn char_count(&self) -> usize {
        match self {
            Self::Absent => 0,
            Self::Text(s) => s.chars().count(),
            _ => self.as_text().chars().count(),
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    #[inline]
    fn from(value: &'a str) -> Self {
        Self::Text(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    #[inline]
    fn from(value: &'a String) -> Self {
        Self::Text(Cow::Borrowed(value.as_str()))
    }
}

impl From<String> for FieldValue<'_> {
    #[inline]
    fn from(value: String) -> Self {
        Self::Text(Cow::Owned(value))
    }
}

impl<'a> From<Cow<'a, str>> for FieldValue<'a> {
    #[inline]
    fn from(value: Cow<'a, str>) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue<'_> {
    #[inline]
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FieldValue<'_> {
    #[inline]
    fn from(value: i32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<u32> for FieldValue<'_> {
    #[inline]
    fn from(value: u32) -> Self {
        Self::Integer(value.into())
    }
}

impl From<f64> for FieldValue<'_> {
    #[inline]
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<'a, T: Into<FieldValue<'a>>> From<Option<T>> for FieldValue<'a> {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

impl<'a> From<&'a JsonValue> for FieldValue<'a> {
    fn from(value: &'a JsonValue) -> Self {
        match value {
            JsonValue::Null => Self::Absent,
            JsonValue::String(s) => Self::Text(Cow::Borrowed(s.as_str())),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    Self::Float(f)
                } else {
                    Self::Text(Cow::Owned(n.to_string()))
                }
            }
            JsonValue::Bool(true) => Self::Text(Cow::Borrowed("1")),
            JsonValue::Bool(false) => Self::Text(Cow::Borrowed("")),
            _ => Self::Text(Cow::Owned(value.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FieldValue;
    use crate::json;

    #[test]
    fn it_detects_empty_values() {
        assert!(FieldValue::Absent.is_empty());
        assert!(FieldValue::from("").is_empty());
        assert!(FieldValue::from(None::<&str>).is_empty());
        assert!(!FieldValue::from("0").is_empty());
        assert!(!FieldValue::from(0).is_empty());
    }

    #[test]
    fn it_counts_characters() {
        assert_eq!(FieldValue::from("João").char_count(), 4);
        assert_eq!(FieldValue::from(12345).char_count(), 5);
        assert_eq!(FieldValue::from(1.5).as_text(), "1.5");
        assert_eq!(FieldValue::Absent.char_count(), 0);
    }

    #[test]
    fn it_converts_json_values() {
        let form = json!({
            "name": "alice",
            "age": 18,
            "price": 9.5,
            "agree": true,
            "tags": ["a", "b"],
            "note": null,
        });
        assert_eq!(FieldValue::from(&form["name"]), FieldValue::from("alice"));
        assert_eq!(FieldValue::from(&form["age"]), FieldValue::Integer(18));
        assert_eq!(FieldValue::from(&form["price"]), FieldValue::Float(9.5));
        assert_eq!(FieldValue::from(&form["agree"]).as_text(), "1");
        assert_eq!(FieldValue::from(&form["tags"]).as_text(), r#"["a","b"]"#);
        assert!(FieldValue::from(&form["note"]).is_empty());
    }
}
