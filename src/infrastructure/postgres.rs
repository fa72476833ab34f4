//! `PostgreSQL` repository implementation.
//!
//! Each collection is a table holding the serialized document as JSONB, keyed
//! by the identity's hex form. Embedded children stay inside the owner's JSON,
//! so the transaction lookup is a JSONB containment query.
//!
//! # Table Schema
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS records (
//!     id TEXT PRIMARY KEY,
//!     data JSONB NOT NULL
//! );
//! -- same layout for daily_records, contacts, ingredients and recipes
//! ```

use std::fmt::Write as _;
use std::marker::PhantomData;

use futures::FutureExt;
use serde_json::json;
use sqlx::PgPool;

use crate::domain::{Contact, DailyRecord, DocumentId, Ingredient, Recipe, Record};
use crate::infrastructure::{
    Document, DocumentRepository, ListOrder, RecordRepository, RepositoryError, RepositoryFuture,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn database_error(error: sqlx::Error) -> RepositoryError {
    RepositoryError::DatabaseError(error.to_string())
}

fn serialization_error(error: serde_json::Error) -> RepositoryError {
    RepositoryError::SerializationError(error.to_string())
}

fn decode<T: Document>(data: serde_json::Value) -> Result<T, RepositoryError> {
    serde_json::from_value(data).map_err(serialization_error)
}

/// Builds the `SELECT` used by [`DocumentRepository::list`] for `T`.
fn list_query<T: Document>() -> String {
    let mut query = format!("SELECT data FROM {} ORDER BY ", T::COLLECTION);
    // Field names come from `Document::LIST_ORDER` constants, never from input.
    let _ = match T::LIST_ORDER {
        ListOrder::Ascending(field) => write!(query, "(data->>'{field}')::timestamptz ASC, id"),
        ListOrder::Descending(field) => write!(query, "(data->>'{field}')::timestamptz DESC, id"),
    };
    query
}

/// Creates every collection table that does not exist yet.
///
/// # Errors
///
/// Returns `RepositoryError::DatabaseError` if a statement fails.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), RepositoryError> {
    for table in [
        Record::COLLECTION,
        DailyRecord::COLLECTION,
        Contact::COLLECTION,
        Ingredient::COLLECTION,
        Recipe::COLLECTION,
    ] {
        sqlx::query(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (id TEXT PRIMARY KEY, data JSONB NOT NULL)"
        ))
        .execute(pool)
        .await
        .map_err(database_error)?;
    }
    tracing::debug!("collection tables ready");
    Ok(())
}

// =============================================================================
// PostgreSQL Collection
// =============================================================================

/// `PostgreSQL` implementation of [`DocumentRepository`].
///
/// # Example
///
/// ```ignore
/// let pool = PgPool::connect("postgres://localhost/getdub").await?;
/// let contacts: PostgresCollection<Contact> = PostgresCollection::new(pool);
///
/// contacts.insert(&contact).await?;
/// let found = contacts.find_by_id(&contact.contact_id).await?;
/// ```
#[derive(Debug)]
pub struct PostgresCollection<T> {
    pool: PgPool,
    document: PhantomData<fn() -> T>,
}

impl<T> PostgresCollection<T> {
    /// Creates a collection backed by the given connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self {
            pool,
            document: PhantomData,
        }
    }
}

impl<T> Clone for PostgresCollection<T> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

impl<T: Document> DocumentRepository<T> for PostgresCollection<T> {
    fn find_by_id(&self, id: &DocumentId) -> RepositoryFuture<Option<T>> {
        let pool = self.pool.clone();
        let id = id.to_string();

        async move {
            let row: Option<(serde_json::Value,)> =
                sqlx::query_as(&format!("SELECT data FROM {} WHERE id = $1", T::COLLECTION))
                    .bind(id)
                    .fetch_optional(&pool)
                    .await
                    .map_err(database_error)?;

            row.map(|(data,)| decode(data)).transpose()
        }
        .boxed()
    }

    fn find_many(&self, ids: &[DocumentId]) -> RepositoryFuture<Vec<T>> {
        let pool = self.pool.clone();
        let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();

        async move {
            if ids.is_empty() {
                return Ok(Vec::new());
            }

            let rows: Vec<(serde_json::Value,)> = sqlx::query_as(&format!(
                "SELECT data FROM {} WHERE id = ANY($1)",
                T::COLLECTION
            ))
            .bind(ids)
            .fetch_all(&pool)
            .await
            .map_err(database_error)?;

            rows.into_iter().map(|(data,)| decode(data)).collect()
        }
        .boxed()
    }

    fn insert(&self, document: &T) -> RepositoryFuture<T> {
        let pool = self.pool.clone();
        let document = document.clone();

        async move {
            let data = serde_json::to_value(&document).map_err(serialization_error)?;

            sqlx::query(&format!(
                "INSERT INTO {} (id, data) VALUES ($1, $2)",
                T::COLLECTION
            ))
            .bind(document.document_id().to_string())
            .bind(&data)
            .execute(&pool)
            .await
            .map_err(database_error)?;

            Ok(document)
        }
        .boxed()
    }

    fn update(&self, id: &DocumentId, changes: &T::Changes) -> RepositoryFuture<Option<T>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        let changes = serde_json::to_value(changes).map_err(serialization_error);

        async move {
            let changes = changes?;

            // `||` on JSONB objects overwrites the top-level keys present on the right.
            let row: Option<(serde_json::Value,)> = sqlx::query_as(&format!(
                "UPDATE {} SET data = data || $2 WHERE id = $1 RETURNING data",
                T::COLLECTION
            ))
            .bind(id)
            .bind(&changes)
            .fetch_optional(&pool)
            .await
            .map_err(database_error)?;

            row.map(|(data,)| decode(data)).transpose()
        }
        .boxed()
    }

    fn delete(&self, id: &DocumentId) -> RepositoryFuture<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();

        async move {
            let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", T::COLLECTION))
                .bind(id)
                .execute(&pool)
                .await
                .map_err(database_error)?;

            Ok(result.rows_affected() > 0)
        }
        .boxed()
    }

    fn list(&self) -> RepositoryFuture<Vec<T>> {
        let pool = self.pool.clone();

        async move {
            let rows: Vec<(serde_json::Value,)> = sqlx::query_as(&list_query::<T>())
                .fetch_all(&pool)
                .await
                .map_err(database_error)?;

            rows.into_iter().map(|(data,)| decode(data)).collect()
        }
        .boxed()
    }
}

impl RecordRepository for PostgresCollection<Record> {
    fn find_by_transaction(&self, transaction_id: &DocumentId) -> RepositoryFuture<Option<Record>> {
        let pool = self.pool.clone();
        let containment = json!([{ "_id": transaction_id.to_string() }]);

        async move {
            let row: Option<(serde_json::Value,)> = sqlx::query_as(&format!(
                "SELECT data FROM {} WHERE data->'transacciones' @> $1 LIMIT 1",
                Record::COLLECTION
            ))
            .bind(&containment)
            .fetch_optional(&pool)
            .await
            .map_err(database_error)?;

            row.map(|(data,)| decode(data)).transpose()
        }
        .boxed()
    }
}

// =============================================================================
// Tests
// =============================================================================
