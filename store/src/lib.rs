//! Persistence for validated catalogue entities
pub mod config;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod repository;

pub use config::{ConfigError, DatabaseConfig};
pub use error::StoreError;
pub use memory::InMemoryStore;
pub use postgres::PgStore;
pub use repository::{BookRepository, CustomerRepository};
