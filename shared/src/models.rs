use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::error::ValidationError;
use crate::fields::{
    BookField, CustomerField, FieldSlot, WriteMode, AUTHOR_MAX_LENGTH, BOOK_TYPE_MAX_LENGTH,
    CITY_MAX_LENGTH, DEFAULT_STATUS, NAME_MAX_LENGTH, STATUS_MAX_LENGTH,
};
use crate::input::RawValue;

// ═══════════════════════════════════════════════════════════════════════════
// BOOKS
// ═══════════════════════════════════════════════════════════════════════════

/// A catalogued book.
///
/// Fields are only reachable through accessors and setters, and every write
/// goes through the field's rule, so a `Book` value is always valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BookRecord")]
pub struct Book {
    id: Uuid,
    name: String,
    author: String,
    year_published: i32,
    book_type: String,
    status: String,
}

impl Book {
    /// Create a book, stripping markup from text fields.
    ///
    /// A blank `status` falls back to `"available"`.
    pub fn new(
        name: impl Into<RawValue>,
        author: impl Into<RawValue>,
        year_published: impl Into<RawValue>,
        book_type: impl Into<RawValue>,
        status: impl Into<RawValue>,
    ) -> Result<Self, ValidationError> {
        Self::new_with_clock(&SystemClock, name, author, year_published, book_type, status)
    }

    /// Same as [`Book::new`] with the year bound taken from `clock`
    pub fn new_with_clock(
        clock: &impl Clock,
        name: impl Into<RawValue>,
        author: impl Into<RawValue>,
        year_published: impl Into<RawValue>,
        book_type: impl Into<RawValue>,
        status: impl Into<RawValue>,
    ) -> Result<Self, ValidationError> {
        let status = status.into();
        let status = if status.is_blank() {
            RawValue::from(DEFAULT_STATUS)
        } else {
            status
        };

        let mut book = Book::unfilled(Uuid::new_v4());
        book.write(BookField::Name, &name.into(), WriteMode::Create, clock)?;
        book.write(BookField::Author, &author.into(), WriteMode::Create, clock)?;
        book.write(BookField::YearPublished, &year_published.into(), WriteMode::Create, clock)?;
        book.write(BookField::BookType, &book_type.into(), WriteMode::Create, clock)?;
        book.write(BookField::Status, &status, WriteMode::Create, clock)?;
        Ok(book)
    }

    fn unfilled(id: Uuid) -> Self {
        Book {
            id,
            name: String::new(),
            author: String::new(),
            year_published: 0,
            book_type: String::new(),
            status: String::new(),
        }
    }

    fn write(
        &mut self,
        field: BookField,
        raw: &RawValue,
        mode: WriteMode,
        clock: &impl Clock,
    ) -> Result<(), ValidationError> {
        self.slot(field).write(field.as_str(), raw, mode, clock)
    }

    fn slot(&mut self, field: BookField) -> FieldSlot<'_> {
        match field {
            BookField::Name => FieldSlot::Text { value: &mut self.name, max_length: NAME_MAX_LENGTH },
            BookField::Author => FieldSlot::Text { value: &mut self.author, max_length: AUTHOR_MAX_LENGTH },
            BookField::YearPublished => FieldSlot::YearPublished(&mut self.year_published),
            BookField::BookType => FieldSlot::Text { value: &mut self.book_type, max_length: BOOK_TYPE_MAX_LENGTH },
            BookField::Status => FieldSlot::Text { value: &mut self.status, max_length: STATUS_MAX_LENGTH },
        }
    }

    /// Reassign one field. Markup is rejected rather than stripped, and on
    /// failure the stored value is left untouched.
    pub fn update(&mut self, field: BookField, value: impl Into<RawValue>) -> Result<(), ValidationError> {
        self.update_with_clock(field, value, &SystemClock)
    }

    pub fn update_with_clock(
        &mut self,
        field: BookField,
        value: impl Into<RawValue>,
        clock: &impl Clock,
    ) -> Result<(), ValidationError> {
        self.write(field, &value.into(), WriteMode::Update, clock)
    }

    pub fn set_name(&mut self, value: impl Into<RawValue>) -> Result<(), ValidationError> {
        self.update(BookField::Name, value)
    }

    pub fn set_author(&mut self, value: impl Into<RawValue>) -> Result<(), ValidationError> {
        self.update(BookField::Author, value)
    }

    pub fn set_year_published(&mut self, value: impl Into<RawValue>) -> Result<(), ValidationError> {
        self.update(BookField::YearPublished, value)
    }

    pub fn set_book_type(&mut self, value: impl Into<RawValue>) -> Result<(), ValidationError> {
        self.update(BookField::BookType, value)
    }

    pub fn set_status(&mut self, value: impl Into<RawValue>) -> Result<(), ValidationError> {
        self.update(BookField::Status, value)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn year_published(&self) -> i32 {
        self.year_published
    }

    pub fn book_type(&self) -> &str {
        &self.book_type
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Row shape handed to storage
    pub fn to_record(&self) -> BookRecord {
        BookRecord {
            id: self.id,
            name: self.name.clone(),
            author: self.author.clone(),
            year_published: self.year_published,
            book_type: self.book_type.clone(),
            status: self.status.clone(),
        }
    }
}

impl std::fmt::Display for Book {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Book(ID: {}, Name: {}, Author: {}, Year Published: {}, Type: {}, Status: {})",
            self.id, self.name, self.author, self.year_published, self.book_type, self.status
        )
    }
}

/// Book row as stored, not yet validated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BookRecord {
    pub id: Uuid,
    pub name: String,
    pub author: String,
    pub year_published: i32,
    pub book_type: String,
    pub status: String,
}

impl TryFrom<BookRecord> for Book {
    type Error = ValidationError;

    /// Re-validate a stored row. Values are checked, never rewritten, so a
    /// saved book loads back exactly as it was.
    fn try_from(record: BookRecord) -> Result<Self, Self::Error> {
        let clock = SystemClock;
        let mut book = Book::unfilled(record.id);
        book.write(BookField::Name, &record.name.into(), WriteMode::Restore, &clock)?;
        book.write(BookField::Author, &record.author.into(), WriteMode::Restore, &clock)?;
        book.write(BookField::YearPublished, &record.year_published.into(), WriteMode::Restore, &clock)?;
        book.write(BookField::BookType, &record.book_type.into(), WriteMode::Restore, &clock)?;
        book.write(BookField::Status, &record.status.into(), WriteMode::Restore, &clock)?;
        Ok(book)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// CUSTOMERS
// ═══════════════════════════════════════════════════════════════════════════

/// A library customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CustomerRecord")]
pub struct Customer {
    id: Uuid,
    name: String,
    city: String,
    age: i32,
}

impl Customer {
    /// Create a customer, stripping markup from text fields
    pub fn new(
        name: impl Into<RawValue>,
        city: impl Into<RawValue>,
        age: impl Into<RawValue>,
    ) -> Result<Self, ValidationError> {
        let mut customer = Customer::unfilled(Uuid::new_v4());
        customer.write(CustomerField::Name, &name.into(), WriteMode::Create)?;
        customer.write(CustomerField::City, &city.into(), WriteMode::Create)?;
        customer.write(CustomerField::Age, &age.into(), WriteMode::Create)?;
        Ok(customer)
    }

    fn unfilled(id: Uuid) -> Self {
        Customer {
            id,
            name: String::new(),
            city: String::new(),
            age: 0,
        }
    }

    fn write(&mut self, field: CustomerField, raw: &RawValue, mode: WriteMode) -> Result<(), ValidationError> {
        self.slot(field).write(field.as_str(), raw, mode, &SystemClock)
    }

    fn slot(&mut self, field: CustomerField) -> FieldSlot<'_> {
        match field {
            CustomerField::Name => FieldSlot::Text { value: &mut self.name, max_length: NAME_MAX_LENGTH },
            CustomerField::City => FieldSlot::Text { value: &mut self.city, max_length: CITY_MAX_LENGTH },
            CustomerField::Age => FieldSlot::Age(&mut self.age),
        }
    }

    /// Reassign one field; the stored value survives a failed update
    pub fn update(&mut self, field: CustomerField, value: impl Into<RawValue>) -> Result<(), ValidationError> {
        self.write(field, &value.into(), WriteMode::Update)
    }

    pub fn set_name(&mut self, value: impl Into<RawValue>) -> Result<(), ValidationError> {
        self.update(CustomerField::Name, value)
    }

    pub fn set_city(&mut self, value: impl Into<RawValue>) -> Result<(), ValidationError> {
        self.update(CustomerField::City, value)
    }

    pub fn set_age(&mut self, value: impl Into<RawValue>) -> Result<(), ValidationError> {
        self.update(CustomerField::Age, value)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn to_record(&self) -> CustomerRecord {
        CustomerRecord {
            id: self.id,
            name: self.name.clone(),
            city: self.city.clone(),
            age: self.age,
        }
    }
}

impl std::fmt::Display for Customer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Customer(ID: {}, Name: {}, City: {}, Age: {})",
            self.id, self.name, self.city, self.age
        )
    }
}

/// Customer row as stored, not yet validated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CustomerRecord {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub age: i32,
}

impl TryFrom<CustomerRecord> for Customer {
    type Error = ValidationError;

    fn try_from(record: CustomerRecord) -> Result<Self, Self::Error> {
        let mut customer = Customer::unfilled(record.id);
        customer.write(CustomerField::Name, &record.name.into(), WriteMode::Restore)?;
        customer.write(CustomerField::City, &record.city.into(), WriteMode::Restore)?;
        customer.write(CustomerField::Age, &record.age.into(), WriteMode::Restore)?;
        Ok(customer)
    }
}
