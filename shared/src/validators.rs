//! Integer field validators
//!
//! Numeric fields arrive as text or integers and are checked against a closed
//! range. The year bound moves with the clock, so callers pass one in.

use std::num::IntErrorKind;

use crate::clock::Clock;
use crate::error::ValidationError;
use crate::input::RawValue;

pub const MIN_AGE: i32 = 0;
pub const MAX_AGE: i32 = 130;
pub const MIN_YEAR_PUBLISHED: i32 = 1;

/// Closed integer range bound to a field name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntRange {
    pub field: &'static str,
    pub min: i32,
    pub max: i32,
}

impl IntRange {
    pub const fn new(field: &'static str, min: i32, max: i32) -> Self {
        Self { field, min, max }
    }

    /// Parse `raw` and check it lies within `min..=max`
    pub fn validate(&self, raw: &RawValue) -> Result<i32, ValidationError> {
        let value = parse_integer(raw).map_err(|err| match err {
            ParseFailure::NotAnInteger => ValidationError::NotAnInteger { field: self.field },
            ParseFailure::Overflow => self.out_of_range(),
        })?;

        if value < i64::from(self.min) || value > i64::from(self.max) {
            return Err(self.out_of_range());
        }

        i32::try_from(value).map_err(|_| self.out_of_range())
    }

    fn out_of_range(&self) -> ValidationError {
        ValidationError::OutOfRange {
            field: self.field,
            min: i64::from(self.min),
            max: i64::from(self.max),
        }
    }
}

enum ParseFailure {
    NotAnInteger,
    Overflow,
}

fn parse_integer(raw: &RawValue) -> Result<i64, ParseFailure> {
    match raw {
        RawValue::Missing => Err(ParseFailure::NotAnInteger),
        RawValue::Integer(n) => Ok(*n),
        RawValue::Text(s) => s.trim().parse::<i64>().map_err(|e| match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ParseFailure::Overflow,
            _ => ParseFailure::NotAnInteger,
        }),
    }
}

/// Range accepted for `year_published` given the clock's current year
pub fn year_published_range(clock: &impl Clock) -> IntRange {
    IntRange::new(
        "year_published",
        MIN_YEAR_PUBLISHED,
        clock.current_year().saturating_add(1),
    )
}

/// Validate a publication year: `1..=current_year + 1`
pub fn validate_year_published(raw: &RawValue, clock: &impl Clock) -> Result<i32, ValidationError> {
    year_published_range(clock).validate(raw)
}

/// Range accepted for a customer's age
pub const AGE_RANGE: IntRange = IntRange::new("age", MIN_AGE, MAX_AGE);

/// Validate an age: `0..=130`
pub fn validate_age(raw: &RawValue) -> Result<i32, ValidationError> {
    AGE_RANGE.validate(raw)
}
