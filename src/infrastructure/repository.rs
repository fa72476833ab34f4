//! Repository traits for the stored documents.
//!
//! Every collection is reached through [`DocumentRepository`], which returns a
//! boxed `'static` future so handlers can hold repositories as trait objects.
//! The [`Document`] trait ties each domain type to its collection name, list
//! order and the shape of its replacement values.

use futures::future::BoxFuture;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::domain::{
    Contact, ContactChanges, DailyRecord, DocumentId, Ingredient, IngredientChanges, Recipe,
    RecipeChanges, Record, Timestamp,
};

// =============================================================================
// Repository Error
// =============================================================================

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Store connection or query error.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Future returned by every repository operation.
pub type RepositoryFuture<T> = BoxFuture<'static, Result<T, RepositoryError>>;

// =============================================================================
// Document
// =============================================================================

/// Order in which [`DocumentRepository::list`] returns a collection.
///
/// Documents with equal timestamps keep ascending identity order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrder {
    /// Ascending by the named timestamp field.
    Ascending(&'static str),
    /// Descending by the named timestamp field.
    Descending(&'static str),
}

/// A top-level stored document.
pub trait Document: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection (table) name.
    const COLLECTION: &'static str;

    /// Order used when listing the collection.
    const LIST_ORDER: ListOrder;

    /// Replacement values accepted by [`DocumentRepository::update`].
    ///
    /// Serialized field names must match the document's, since an update
    /// overwrites the top-level fields present in the serialized changes.
    type Changes: Serialize + Send + Sync + 'static;

    fn document_id(&self) -> DocumentId;

    /// Value of the [`ListOrder`] field.
    fn sort_key(&self) -> Timestamp;
}

/// Overwrites the top-level fields of `current` with those present in `changes`.
///
/// # Errors
///
/// Returns `RepositoryError::SerializationError` if either value does not
/// serialize to a JSON object or the merged object no longer deserializes.
pub fn merge_document<T, C>(current: &T, changes: &C) -> Result<T, RepositoryError>
where
    T: Document,
    C: Serialize + ?Sized,
{
    let serialization_error = |error: serde_json::Error| {
        RepositoryError::SerializationError(error.to_string())
    };

    let mut merged = serde_json::to_value(current).map_err(serialization_error)?;
    let overlay = serde_json::to_value(changes).map_err(serialization_error)?;

    match (merged.as_object_mut(), overlay) {
        (Some(target), Value::Object(fields)) => {
            target.extend(fields);
        }
        _ => {
            return Err(RepositoryError::SerializationError(format!(
                "{} documents must serialize to objects",
                T::COLLECTION
            )));
        }
    }

    serde_json::from_value(merged).map_err(serialization_error)
}

// =============================================================================
// Document Repository
// =============================================================================

/// Store capability for one collection of documents.
pub trait DocumentRepository<T: Document>: Send + Sync {
    /// Finds a document by its identity.
    ///
    /// Returns `Ok(None)` if no document has that identity.
    fn find_by_id(&self, id: &DocumentId) -> RepositoryFuture<Option<T>>;

    /// Finds every document whose identity is in `ids`. Unknown identities are skipped.
    fn find_many(&self, ids: &[DocumentId]) -> RepositoryFuture<Vec<T>>;

    /// Inserts a new document and returns it as stored.
    fn insert(&self, document: &T) -> RepositoryFuture<T>;

    /// Overwrites the fields present in `changes` and returns the updated document.
    ///
    /// Returns `Ok(None)` if no document has that identity.
    fn update(&self, id: &DocumentId, changes: &T::Changes) -> RepositoryFuture<Option<T>>;

    /// Deletes a document by its identity.
    ///
    /// Returns `Ok(true)` if the document was deleted, `Ok(false)` if it didn't exist.
    fn delete(&self, id: &DocumentId) -> RepositoryFuture<bool>;

    /// Lists the whole collection in [`Document::LIST_ORDER`].
    fn list(&self) -> RepositoryFuture<Vec<T>>;
}

/// Record collection with lookup by embedded transaction.
pub trait RecordRepository: DocumentRepository<Record> {
    /// Finds the record whose transaction list contains `transaction_id`.
    fn find_by_transaction(&self, transaction_id: &DocumentId) -> RepositoryFuture<Option<Record>>;
}

// =============================================================================
// Document Implementations
// =============================================================================

impl Document for Record {
    const COLLECTION: &'static str = "records";
    const LIST_ORDER: ListOrder = ListOrder::Ascending("date");
    type Changes = Self;

    fn document_id(&self) -> DocumentId {
        self.record_id
    }

    fn sort_key(&self) -> Timestamp {
        self.date
    }
}

impl Document for DailyRecord {
    const COLLECTION: &'static str = "daily_records";
    const LIST_ORDER: ListOrder = ListOrder::Ascending("date");
    type Changes = Self;

    fn document_id(&self) -> DocumentId {
        self.daily_record_id
    }

    fn sort_key(&self) -> Timestamp {
        self.date
    }
}

impl Document for Contact {
    const COLLECTION: &'static str = "contacts";
    const LIST_ORDER: ListOrder = ListOrder::Descending("fechaCreacion");
    type Changes = ContactChanges;

    fn document_id(&self) -> DocumentId {
        self.contact_id
    }

    fn sort_key(&self) -> Timestamp {
        self.created_at
    }
}

impl Document for Ingredient {
    const COLLECTION: &'static str = "ingredients";
    const LIST_ORDER: ListOrder = ListOrder::Descending("fechaCreacion");
    type Changes = IngredientChanges;

    fn document_id(&self) -> DocumentId {
        self.ingredient_id
    }

    fn sort_key(&self) -> Timestamp {
        self.created_at
    }
}

impl Document for Recipe {
    const COLLECTION: &'static str = "recipes";
    const LIST_ORDER: ListOrder = ListOrder::Ascending("fechaCreacion");
    type Changes = RecipeChanges;

    fn document_id(&self) -> DocumentId {
        self.recipe_id
    }

    fn sort_key(&self) -> Timestamp {
        self.created_at
    }
}

// =============================================================================
// Tests
// =============================================================================
