//! Infrastructure module for document storage.
//!
//! This module contains the repository traits, the in-memory and `PostgreSQL`
//! backends, and the factory that selects one at startup.

pub mod factory;
pub mod in_memory;
pub mod postgres;
pub mod repository;

pub use factory::{
    ConfigurationError, FactoryError, Repositories, RepositoryConfig, RepositoryFactory,
    StorageMode,
};
pub use in_memory::InMemoryCollection;
pub use postgres::PostgresCollection;
pub use repository::{
    Document, DocumentRepository, ListOrder, RecordRepository, RepositoryError, RepositoryFuture,
};
