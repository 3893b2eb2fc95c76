use std::borrow::Cow;
use std::fmt;

/// An untrusted field value as supplied by the application layer.
///
/// Form posts hand over text, JSON bodies may carry numbers, and optional
/// inputs may be absent altogether.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RawValue {
    #[default]
    Missing,
    Text(String),
    Integer(i64),
}

impl RawValue {
    /// Text form of the value, or `None` when it is missing
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            RawValue::Missing => None,
            RawValue::Text(s) => Some(Cow::Borrowed(s.as_str())),
            RawValue::Integer(n) => Some(Cow::Owned(n.to_string())),
        }
    }

    /// Missing, empty text and zero all count as "not supplied"
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Missing => true,
            RawValue::Text(s) => s.is_empty(),
            RawValue::Integer(n) => *n == 0,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Missing => write!(f, "<missing>"),
            RawValue::Text(s) => write!(f, "{}", s),
            RawValue::Integer(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl From<&String> for RawValue {
    fn from(value: &String) -> Self {
        RawValue::Text(value.clone())
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Integer(value)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Integer(i64::from(value))
    }
}

impl From<u32> for RawValue {
    fn from(value: u32) -> Self {
        RawValue::Integer(i64::from(value))
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(RawValue::Missing, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        assert_eq!(RawValue::from("23"), RawValue::Text("23".to_string()));
        assert_eq!(RawValue::from(23), RawValue::Integer(23));
        assert_eq!(RawValue::from(None::<&str>), RawValue::Missing);
        assert_eq!(RawValue::from(Some(7u32)), RawValue::Integer(7));
    }

    #[test]
    fn test_as_text() {
        assert_eq!(RawValue::Integer(-5).as_text().as_deref(), Some("-5"));
        assert_eq!(RawValue::from("abc").as_text().as_deref(), Some("abc"));
        assert!(RawValue::Missing.as_text().is_none());
    }

    #[test]
    fn test_is_blank() {
        assert!(RawValue::Missing.is_blank());
        assert!(RawValue::from("").is_blank());
        assert!(RawValue::Integer(0).is_blank());
        assert!(!RawValue::from(" ").is_blank());
        assert!(!RawValue::from("lent").is_blank());
    }
}
