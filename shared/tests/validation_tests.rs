use shared::{
    sanitize, validate_age, validate_year_published, Book, BookField, Customer, CustomerField,
    FixedClock, RawValue, ValidationError,
};

const CLOCK: FixedClock = FixedClock(2025);

#[test]
fn strict_path_rejects_tags_that_construction_strips() {
    let payload = "A<script>alert(1)</script> B";

    let book = Book::new_with_clock(&CLOCK, "Clean", payload, 2024, "novel", "available").unwrap();
    assert!(!book.author().contains('<'));

    let mut book = book;
    assert_eq!(
        book.update(BookField::Author, payload),
        Err(ValidationError::DisallowedCharacters { field: "author" })
    );
}

#[test]
fn every_year_in_range_is_returned_unchanged() {
    for year in 1..=2026 {
        assert_eq!(validate_year_published(&RawValue::from(year), &CLOCK), Ok(year));
    }
    for year in [-1, 0, 2027, 2030] {
        assert!(validate_year_published(&RawValue::from(year), &CLOCK).is_err());
    }
}

#[test]
fn year_bound_is_read_from_the_wall_clock_by_default() {
    use chrono::Datelike;

    let next_year = chrono::Utc::now().year() + 1;
    assert!(Book::new("Soon", "Someone", next_year, "novel", "available").is_ok());
    assert!(Book::new("Later", "Someone", next_year + 4, "novel", "available").is_err());
}

#[test]
fn every_age_in_range_is_accepted() {
    for age in 0..=130 {
        assert_eq!(validate_age(&RawValue::from(age.to_string())), Ok(age));
    }
    assert!(validate_age(&RawValue::from(-5)).is_err());
    assert!(validate_age(&RawValue::from("old")).is_err());
}

#[test]
fn long_text_is_truncated_not_rejected() {
    for (len, max) in [(65, 64), (100, 64), (21, 20), (500, 20)] {
        let cleaned = sanitize(&RawValue::from("x".repeat(len)), "field", max, true).unwrap();
        assert_eq!(cleaned.chars().count(), max);
    }
}

#[test]
fn failed_reassignment_is_not_a_partial_write() {
    let mut customer = Customer::new("Jan", "Warszawa", 30).unwrap();
    let before = customer.clone();

    assert!(customer.update(CustomerField::City, "<script>evil()</script>").is_err());
    assert!(customer.update(CustomerField::Name, None::<&str>).is_err());
    assert!(customer.update(CustomerField::Age, "thirty").is_err());

    assert_eq!(customer, before);
}

#[test]
fn fields_read_back_exactly_as_stored() {
    let book = Book::new_with_clock(
        &CLOCK,
        "  Pan   Tadeusz ",
        "Adam Mickiewicz",
        "1834",
        "epic",
        None::<&str>,
    )
    .unwrap();

    assert_eq!(book.name(), "Pan Tadeusz");
    assert_eq!(book.author(), "Adam Mickiewicz");
    assert_eq!(book.year_published(), 1834);
    assert_eq!(book.book_type(), "epic");
    assert_eq!(book.status(), "available");

    let record = book.to_record();
    assert_eq!(record.name, book.name());
    assert_eq!(record.status, book.status());
}

#[test]
fn failed_construction_yields_no_entity() {
    let result = Customer::new("Ewa", "Łódź", 131);
    assert!(matches!(
        result,
        Err(ValidationError::OutOfRange { field: "age", min: 0, max: 130 })
    ));
}

#[test]
fn typographic_apostrophe_is_not_allowed() {
    assert!(Customer::new("O'Brien", "Cork", 40).is_ok());
    assert_eq!(
        Customer::new("O\u{2019}Brien", "Cork", 40).unwrap_err(),
        ValidationError::DisallowedCharacters { field: "name" }
    );
}

#[test]
fn updated_text_survives_the_record_round_trip() {
    let inputs = [
        format!("{} tail", "X".repeat(63)),
        format!("{}  \t{}", "y".repeat(62), "z".repeat(10)),
        "  The   Hobbit  ".to_string(),
        "a b".repeat(30),
    ];

    for input in &inputs {
        for field in [BookField::Name, BookField::Author, BookField::BookType, BookField::Status] {
            let mut book =
                Book::new_with_clock(&CLOCK, "Good", "OK", 2020, "test", "available").unwrap();
            if book.update_with_clock(field, input.as_str(), &CLOCK).is_ok() {
                assert_eq!(Book::try_from(book.to_record()), Ok(book), "{field}: {input:?}");
            }
        }

        for field in [CustomerField::Name, CustomerField::City] {
            let mut customer = Customer::new("Jan", "Warszawa", 30).unwrap();
            if customer.update(field, input.as_str()).is_ok() {
                assert_eq!(Customer::try_from(customer.to_record()), Ok(customer), "{field}: {input:?}");
            }
        }
    }
}
