//! Persistence ports for catalogue entities
//!
//! Implementations receive entities that already passed validation and must
//! only hand back entities rebuilt through `TryFrom<Record>`. Name uniqueness
//! is enforced here, not by the entities.

use async_trait::async_trait;
use shared::{Book, Customer};
use uuid::Uuid;

use crate::error::StoreError;

#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Insert the book, or overwrite the row with the same id
    async fn save_book(&self, book: &Book) -> Result<(), StoreError>;

    async fn find_book(&self, id: Uuid) -> Result<Option<Book>, StoreError>;

    async fn find_book_by_name(&self, name: &str) -> Result<Option<Book>, StoreError>;

    /// All books ordered by name
    async fn list_books(&self) -> Result<Vec<Book>, StoreError>;

    /// Returns false when no book had that id
    async fn delete_book(&self, id: Uuid) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Insert the customer, or overwrite the row with the same id
    async fn save_customer(&self, customer: &Customer) -> Result<(), StoreError>;

    async fn find_customer(&self, id: Uuid) -> Result<Option<Customer>, StoreError>;

    async fn find_customer_by_name(&self, name: &str) -> Result<Option<Customer>, StoreError>;

    /// All customers ordered by name
    async fn list_customers(&self) -> Result<Vec<Customer>, StoreError>;

    async fn delete_customer(&self, id: Uuid) -> Result<bool, StoreError>;
}
