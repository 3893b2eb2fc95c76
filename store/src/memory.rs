use std::collections::HashMap;

use async_trait::async_trait;
use shared::{Book, BookRecord, Customer, CustomerRecord};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::error::StoreError;
use crate::repository::{BookRepository, CustomerRepository};

/// Process-local store backed by hash maps.
///
/// Rows are kept in record form and rebuilt into entities on every read, the
/// same way the Postgres store does.
#[derive(Default)]
pub struct InMemoryStore {
    books: RwLock<HashMap<Uuid, BookRecord>>,
    customers: RwLock<HashMap<Uuid, CustomerRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Names that differ only by edge spaces count as the same name, matching the
/// `btrim(name)` unique indexes in Postgres
fn same_name(stored: &str, candidate: &str) -> bool {
    stored.trim() == candidate.trim()
}

#[async_trait]
impl BookRepository for InMemoryStore {
    async fn save_book(&self, book: &Book) -> Result<(), StoreError> {
        let mut books = self.books.write().await;

        if books
            .values()
            .any(|row| same_name(&row.name, book.name()) && row.id != book.id())
        {
            return Err(StoreError::DuplicateName(book.name().to_string()));
        }

        books.insert(book.id(), book.to_record());
        debug!("Saved book: id={}, name={}", book.id(), book.name());
        Ok(())
    }

    async fn find_book(&self, id: Uuid) -> Result<Option<Book>, StoreError> {
        let books = self.books.read().await;
        books
            .get(&id)
            .cloned()
            .map(Book::try_from)
            .transpose()
            .map_err(StoreError::from)
    }

    async fn find_book_by_name(&self, name: &str) -> Result<Option<Book>, StoreError> {
        let books = self.books.read().await;
        books
            .values()
            .find(|row| row.name == name)
            .cloned()
            .map(Book::try_from)
            .transpose()
            .map_err(StoreError::from)
    }

    async fn list_books(&self) -> Result<Vec<Book>, StoreError> {
        let books = self.books.read().await;
        let mut rows: Vec<BookRecord> = books.values().cloned().collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        rows.into_iter()
            .map(|row| Book::try_from(row).map_err(StoreError::from))
            .collect()
    }

    async fn delete_book(&self, id: Uuid) -> Result<bool, StoreError> {
        let removed = self.books.write().await.remove(&id).is_some();
        debug!("Delete book: id={}, removed={}", id, removed);
        Ok(removed)
    }
}

#[async_trait]
impl CustomerRepository for InMemoryStore {
    async fn save_customer(&self, customer: &Customer) -> Result<(), StoreError> {
        let mut customers = self.customers.write().await;

        if customers
            .values()
            .any(|row| same_name(&row.name, customer.name()) && row.id != customer.id())
        {
            return Err(StoreError::DuplicateName(customer.name().to_string()));
        }

        customers.insert(customer.id(), customer.to_record());
        debug!("Saved customer: id={}, name={}", customer.id(), customer.name());
        Ok(())
    }

    async fn find_customer(&self, id: Uuid) -> Result<Option<Customer>, StoreError> {
        let customers = self.customers.read().await;
        customers
            .get(&id)
            .cloned()
            .map(Customer::try_from)
            .transpose()
            .map_err(StoreError::from)
    }

    async fn find_customer_by_name(&self, name: &str) -> Result<Option<Customer>, StoreError> {
        let customers = self.customers.read().await;
        customers
            .values()
            .find(|row| row.name == name)
            .cloned()
            .map(Customer::try_from)
            .transpose()
            .map_err(StoreError::from)
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, StoreError> {
        let customers = self.customers.read().await;
        let mut rows: Vec<CustomerRecord> = customers.values().cloned().collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        rows.into_iter()
            .map(|row| Customer::try_from(row).map_err(StoreError::from))
            .collect()
    }

    async fn delete_customer(&self, id: Uuid) -> Result<bool, StoreError> {
        let removed = self.customers.write().await.remove(&id).is_some();
        debug!("Delete customer: id={}, removed={}", id, removed);
        Ok(removed)
    }
}
