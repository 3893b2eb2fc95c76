pub mod clock;
pub mod error;
pub mod fields;
pub mod input;
pub mod models;
pub mod sanitizers;
pub mod validators;

pub use clock::*;
pub use error::*;
pub use fields::*;
pub use input::*;
pub use models::*;
pub use sanitizers::sanitize;
pub use validators::{validate_age, validate_year_published, IntRange};
