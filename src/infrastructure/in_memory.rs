//! In-memory repository implementation.
//!
//! Documents live in a `BTreeMap` keyed by identity behind an `Arc<RwLock<...>>`.
//! Listing sorts a snapshot taken in map order, so ties keep identity order.
//! Suitable for tests and for running the service without a database.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::RwLock;

use crate::domain::{DocumentId, Record};
use crate::infrastructure::repository::merge_document;
use crate::infrastructure::{
    Document, DocumentRepository, ListOrder, RecordRepository, RepositoryError, RepositoryFuture,
};

// =============================================================================
// In-Memory Collection
// =============================================================================

/// In-memory implementation of [`DocumentRepository`].
///
/// # Example
///
/// ```ignore
/// let contacts: InMemoryCollection<Contact> = InMemoryCollection::new();
/// let contact = Contact::new(DocumentId::generate(), "Ana", Timestamp::now());
///
/// contacts.insert(&contact).await?;
/// let found = contacts.find_by_id(&contact.contact_id).await?;
/// ```
#[derive(Debug)]
pub struct InMemoryCollection<T> {
    documents: Arc<RwLock<BTreeMap<DocumentId, T>>>,
}

impl<T> InMemoryCollection<T> {
    /// Creates a new empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }
}

impl<T> Clone for InMemoryCollection<T> {
    fn clone(&self) -> Self {
        Self {
            documents: Arc::clone(&self.documents),
        }
    }
}

impl<T> Default for InMemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sorts `documents` in place according to `T::LIST_ORDER`. The sort is stable.
fn sort_for_listing<T: Document>(documents: &mut [T]) {
    match T::LIST_ORDER {
        ListOrder::Ascending(_) => documents.sort_by_key(Document::sort_key),
        ListOrder::Descending(_) => {
            documents.sort_by(|left, right| right.sort_key().cmp(&left.sort_key()));
        }
    }
}

#[allow(clippy::significant_drop_tightening)]
impl<T: Document> DocumentRepository<T> for InMemoryCollection<T> {
    fn find_by_id(&self, id: &DocumentId) -> RepositoryFuture<Option<T>> {
        let documents = Arc::clone(&self.documents);
        let id = *id;
        async move {
            let guard = documents.read().await;
            Ok(guard.get(&id).cloned())
        }
        .boxed()
    }

    fn find_many(&self, ids: &[DocumentId]) -> RepositoryFuture<Vec<T>> {
        let documents = Arc::clone(&self.documents);
        let ids = ids.to_vec();
        async move {
            let guard = documents.read().await;
            Ok(ids.iter().filter_map(|id| guard.get(id).cloned()).collect())
        }
        .boxed()
    }

    fn insert(&self, document: &T) -> RepositoryFuture<T> {
        let documents = Arc::clone(&self.documents);
        let document = document.clone();
        async move {
            let mut guard = documents.write().await;
            let id = document.document_id();
            if guard.contains_key(&id) {
                return Err(RepositoryError::DatabaseError(format!(
                    "duplicate key in {}: {id}",
                    T::COLLECTION
                )));
            }
            guard.insert(id, document.clone());
            Ok(document)
        }
        .boxed()
    }

    fn update(&self, id: &DocumentId, changes: &T::Changes) -> RepositoryFuture<Option<T>> {
        let documents = Arc::clone(&self.documents);
        let id = *id;
        let changes = serde_json::to_value(changes)
            .map_err(|error| RepositoryError::SerializationError(error.to_string()));
        async move {
            let changes = changes?;
            let mut guard = documents.write().await;
            let Some(current) = guard.get_mut(&id) else {
                return Ok(None);
            };
            let merged = merge_document(&*current, &changes)?;
            *current = merged.clone();
            Ok(Some(merged))
        }
        .boxed()
    }

    fn delete(&self, id: &DocumentId) -> RepositoryFuture<bool> {
        let documents = Arc::clone(&self.documents);
        let id = *id;
        async move {
            let mut guard = documents.write().await;
            Ok(guard.remove(&id).is_some())
        }
        .boxed()
    }

    fn list(&self) -> RepositoryFuture<Vec<T>> {
        let documents = Arc::clone(&self.documents);
        async move {
            let mut listed: Vec<T> = documents.read().await.values().cloned().collect();
            sort_for_listing(&mut listed);
            Ok(listed)
        }
        .boxed()
    }
}

#[allow(clippy::significant_drop_tightening)]
impl RecordRepository for InMemoryCollection<Record> {
    fn find_by_transaction(&self, transaction_id: &DocumentId) -> RepositoryFuture<Option<Record>> {
        let documents = Arc::clone(&self.documents);
        let transaction_id = *transaction_id;
        async move {
            let guard = documents.read().await;
            Ok(guard
                .values()
                .find(|record| record.transaction(&transaction_id).is_some())
                .cloned())
        }
        .boxed()
    }
}

// =============================================================================
// Tests
// =============================================================================
