use thiserror::Error;

/// Rejection raised when a raw field value fails sanitization or validation.
///
/// Every variant names the offending field so callers can report it back
/// verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("{field} must be an integer")]
    NotAnInteger { field: &'static str },
    #[error("{field} is out of allowed range ({min}..={max})")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },
    #[error("Invalid characters in {field}")]
    DisallowedCharacters { field: &'static str },
}

impl ValidationError {
    /// Name of the field that was rejected
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Required { field }
            | ValidationError::NotAnInteger { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::DisallowedCharacters { field } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_field() {
        assert_eq!(
            ValidationError::Required { field: "name" }.to_string(),
            "name is required"
        );
        assert_eq!(
            ValidationError::NotAnInteger { field: "age" }.to_string(),
            "age must be an integer"
        );
        assert_eq!(
            ValidationError::OutOfRange {
                field: "age",
                min: 0,
                max: 130
            }
            .to_string(),
            "age is out of allowed range (0..=130)"
        );
        assert_eq!(
            ValidationError::DisallowedCharacters { field: "city" }.to_string(),
            "Invalid characters in city"
        );
    }

    #[test]
    fn test_field_accessor() {
        let err = ValidationError::OutOfRange {
            field: "year_published",
            min: 1,
            max: 2027,
        };
        assert_eq!(err.field(), "year_published");
    }
}
