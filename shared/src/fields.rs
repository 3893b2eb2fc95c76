//! Field rule table
//!
//! Names every entity field and the rule that guards its writes. Entities
//! hand out a [`FieldSlot`] per field instead of dispatching on field names.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::ValidationError;
use crate::input::RawValue;
use crate::sanitizers::{check_stored, sanitize};
use crate::validators::{validate_age, validate_year_published};

pub const NAME_MAX_LENGTH: usize = 64;
pub const AUTHOR_MAX_LENGTH: usize = 64;
pub const CITY_MAX_LENGTH: usize = 64;
pub const BOOK_TYPE_MAX_LENGTH: usize = 20;
pub const STATUS_MAX_LENGTH: usize = 20;

/// Status stored when a book is created without one
pub const DEFAULT_STATUS: &str = "available";

/// Which write path a value is arriving through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Constructor arguments: markup is stripped
    Create,
    /// Reassignment of a stored field: markup is rejected
    Update,
    /// Rebuilding an entity from a stored row: the value must already be clean
    Restore,
}

impl WriteMode {
    pub fn reject_on_xss(self) -> bool {
        !matches!(self, WriteMode::Create)
    }
}

/// One entity field, borrowed together with the rule that guards it.
///
/// Each variant pairs a destination with the only kind of value its rule can
/// produce, so a text rule can never be routed into an integer field.
#[derive(Debug)]
pub enum FieldSlot<'a> {
    Text { value: &'a mut String, max_length: usize },
    YearPublished(&'a mut i32),
    Age(&'a mut i32),
}

impl FieldSlot<'_> {
    /// Run `raw` through the slot's rule and store the result.
    ///
    /// The destination is only assigned once the rule has passed.
    pub fn write(
        self,
        field: &'static str,
        raw: &RawValue,
        mode: WriteMode,
        clock: &impl Clock,
    ) -> Result<(), ValidationError> {
        match self {
            FieldSlot::Text { value, max_length } => {
                *value = clean_text(raw, field, max_length, mode)?;
            }
            FieldSlot::YearPublished(value) => *value = validate_year_published(raw, clock)?,
            FieldSlot::Age(value) => *value = validate_age(raw)?,
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookField {
    Name,
    Author,
    YearPublished,
    BookType,
    Status,
}

impl BookField {
    pub const ALL: [BookField; 5] = [
        BookField::Name,
        BookField::Author,
        BookField::YearPublished,
        BookField::BookType,
        BookField::Status,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BookField::Name => "name",
            BookField::Author => "author",
            BookField::YearPublished => "year_published",
            BookField::BookType => "book_type",
            BookField::Status => "status",
        }
    }

}

impl fmt::Display for BookField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerField {
    Name,
    City,
    Age,
}

impl CustomerField {
    pub const ALL: [CustomerField; 3] = [CustomerField::Name, CustomerField::City, CustomerField::Age];

    pub fn as_str(self) -> &'static str {
        match self {
            CustomerField::Name => "name",
            CustomerField::City => "city",
            CustomerField::Age => "age",
        }
    }

}

impl fmt::Display for CustomerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sanitize a text field for the given write path.
///
/// A created value is cleaned leniently and the cleaned result must then
/// survive the strict check as well, so stripping can never leave a marker
/// behind. A restored value is checked but never rewritten.
pub fn clean_text(
    raw: &RawValue,
    field: &'static str,
    max_length: usize,
    mode: WriteMode,
) -> Result<String, ValidationError> {
    match mode {
        WriteMode::Create => {
            let cleaned = sanitize(raw, field, max_length, false)?;
            sanitize(&RawValue::Text(cleaned), field, max_length, true)
        }
        WriteMode::Update => sanitize(raw, field, max_length, true),
        WriteMode::Restore => check_stored(raw, field, max_length),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    #[test]
    fn test_field_names() {
        let names: Vec<_> = BookField::ALL.iter().map(|f| f.to_string()).collect();
        assert_eq!(names, ["name", "author", "year_published", "book_type", "status"]);
        assert_eq!(CustomerField::City.as_str(), "city");
    }

    #[test]
    fn test_slot_write_stores_typed_value() {
        let clock = FixedClock(2025);
        let mut book_type = String::from("novel");
        FieldSlot::Text { value: &mut book_type, max_length: 5 }
            .write("book_type", &RawValue::from("novella"), WriteMode::Update, &clock)
            .unwrap();
        assert_eq!(book_type, "novel");

        let mut year = 0;
        FieldSlot::YearPublished(&mut year)
            .write("year_published", &RawValue::from("2026"), WriteMode::Update, &clock)
            .unwrap();
        assert_eq!(year, 2026);

        let mut age = 0;
        FieldSlot::Age(&mut age)
            .write("age", &RawValue::from(30), WriteMode::Create, &clock)
            .unwrap();
        assert_eq!(age, 30);
    }

    #[test]
    fn test_slot_write_failure_leaves_destination_alone() {
        let clock = FixedClock(2025);
        let mut city = String::from("Warszawa");
        let result = FieldSlot::Text { value: &mut city, max_length: 64 }
            .write("city", &RawValue::from("<b>x</b>"), WriteMode::Update, &clock);
        assert_eq!(result, Err(ValidationError::DisallowedCharacters { field: "city" }));
        assert_eq!(city, "Warszawa");

        let mut age = 30;
        assert!(FieldSlot::Age(&mut age)
            .write("age", &RawValue::from(131), WriteMode::Update, &clock)
            .is_err());
        assert_eq!(age, 30);
    }

    #[test]
    fn test_clean_text_create_strips_markup() {
        let raw = RawValue::from("Ci<script>ty</script>");
        assert_eq!(
            clean_text(&raw, "city", 64, WriteMode::Create),
            Ok("City".to_string())
        );
    }

    #[test]
    fn test_clean_text_update_rejects_markup() {
        let raw = RawValue::from("<script>evil()</script>");
        assert_eq!(
            clean_text(&raw, "city", 64, WriteMode::Update),
            Err(ValidationError::DisallowedCharacters { field: "city" })
        );
    }

    #[test]
    fn test_clean_text_create_rejects_reformed_marker() {
        let raw = RawValue::from("javajavascript:script:alert");
        assert_eq!(
            clean_text(&raw, "name", 64, WriteMode::Create),
            Err(ValidationError::DisallowedCharacters { field: "name" })
        );
    }

    #[test]
    fn test_clean_text_restore_keeps_edge_space() {
        let raw = RawValue::from("Solaris ");
        assert_eq!(
            clean_text(&raw, "name", 64, WriteMode::Restore),
            Ok("Solaris ".to_string())
        );
        assert_eq!(
            clean_text(&raw, "name", 64, WriteMode::Update),
            Ok("Solaris".to_string())
        );
    }

    #[test]
    fn test_clean_text_restore_rejects_unclean_value() {
        let raw = RawValue::from("Sola  ris");
        assert_eq!(
            clean_text(&raw, "name", 64, WriteMode::Restore),
            Err(ValidationError::DisallowedCharacters { field: "name" })
        );
    }
}
