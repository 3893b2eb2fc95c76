/// Postgres store
/// Persists validated books and customers; rows are re-validated on the way out

use async_trait::async_trait;
use shared::{Book, BookRecord, Customer, CustomerRecord};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::config::DatabaseConfig;
use crate::error::StoreError;
use crate::repository::{BookRepository, CustomerRepository};

/// SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

/// Database-backed store for catalogue entities
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create new store over an existing pool
    pub fn new(pool: PgPool) -> Self {
        PgStore { pool }
    }

    /// Open a connection pool using the given configuration
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.connection_string)
            .await
            .map_err(|e| {
                error!("Failed to connect to database: {}", e);
                StoreError::Database(e.to_string())
            })?;

        info!(
            "Database pool opened: max_connections={}",
            config.max_connections
        );

        Ok(PgStore { pool })
    }

    /// Apply pending schema migrations
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to run migrations: {}", e);
                StoreError::Database(e.to_string())
            })?;

        info!("Database migrations applied");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Translate a sqlx failure, recognising unique-name conflicts
fn map_write_error(e: sqlx::Error, name: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            debug!("Unique name conflict: {}", name);
            return StoreError::DuplicateName(name.to_string());
        }
    }
    error!("Failed to write record {}: {}", name, e);
    StoreError::Database(e.to_string())
}

fn map_query_error(e: sqlx::Error) -> StoreError {
    error!("Database query failed: {}", e);
    StoreError::Database(e.to_string())
}

#[async_trait]
impl BookRepository for PgStore {
    async fn save_book(&self, book: &Book) -> Result<(), StoreError> {
        let record = book.to_record();
        debug!("Writing book to database: id={}, name={}", record.id, record.name);

        sqlx::query(
            r#"
            INSERT INTO books (id, name, author, year_published, book_type, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                author = EXCLUDED.author,
                year_published = EXCLUDED.year_published,
                book_type = EXCLUDED.book_type,
                status = EXCLUDED.status
            "#,
        )
        .bind(record.id)
        .bind(&record.name)
        .bind(&record.author)
        .bind(record.year_published)
        .bind(&record.book_type)
        .bind(&record.status)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &record.name))?;

        info!("Book saved: id={}, name={}", record.id, record.name);
        Ok(())
    }

    async fn find_book(&self, id: Uuid) -> Result<Option<Book>, StoreError> {
        let row = sqlx::query_as::<_, BookRecord>(
            r#"
            SELECT id, name, author, year_published, book_type, status
            FROM books
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_query_error)?;

        Ok(row.map(Book::try_from).transpose()?)
    }

    async fn find_book_by_name(&self, name: &str) -> Result<Option<Book>, StoreError> {
        let row = sqlx::query_as::<_, BookRecord>(
            r#"
            SELECT id, name, author, year_published, book_type, status
            FROM books
            WHERE name = $1
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_query_error)?;

        Ok(row.map(Book::try_from).transpose()?)
    }

    async fn list_books(&self) -> Result<Vec<Book>, StoreError> {
        let rows = sqlx::query_as::<_, BookRecord>(
            r#"
            SELECT id, name, author, year_published, book_type, status
            FROM books
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_query_error)?;

        debug!("Fetched {} books", rows.len());

        rows.into_iter()
            .map(|row| Book::try_from(row).map_err(StoreError::from))
            .collect()
    }

    async fn delete_book(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_query_error)?;

        info!("Book delete: id={}, rows={}", id, result.rows_affected());
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CustomerRepository for PgStore {
    async fn save_customer(&self, customer: &Customer) -> Result<(), StoreError> {
        let record = customer.to_record();
        debug!("Writing customer to database: id={}, name={}", record.id, record.name);

        sqlx::query(
            r#"
            INSERT INTO customers (id, name, city, age)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                city = EXCLUDED.city,
                age = EXCLUDED.age
            "#,
        )
        .bind(record.id)
        .bind(&record.name)
        .bind(&record.city)
        .bind(record.age)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &record.name))?;

        info!("Customer saved: id={}, name={}", record.id, record.name);
        Ok(())
    }

    async fn find_customer(&self, id: Uuid) -> Result<Option<Customer>, StoreError> {
        let row = sqlx::query_as::<_, CustomerRecord>(
            r#"
            SELECT id, name, city, age
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_query_error)?;

        Ok(row.map(Customer::try_from).transpose()?)
    }

    async fn find_customer_by_name(&self, name: &str) -> Result<Option<Customer>, StoreError> {
        let row = sqlx::query_as::<_, CustomerRecord>(
            r#"
            SELECT id, name, city, age
            FROM customers
            WHERE name = $1
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_query_error)?;

        Ok(row.map(Customer::try_from).transpose()?)
    }

    async fn list_customers(&self) -> Result<Vec<Customer>, StoreError> {
        let rows = sqlx::query_as::<_, CustomerRecord>(
            r#"
            SELECT id, name, city, age
            FROM customers
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_query_error)?;

        debug!("Fetched {} customers", rows.len());

        rows.into_iter()
            .map(|row| Customer::try_from(row).map_err(StoreError::from))
            .collect()
    }

    async fn delete_customer(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_query_error)?;

        info!("Customer delete: id={}, rows={}", id, result.rows_affected());
        Ok(result.rows_affected() > 0)
    }
}
