//! Repository factory for runtime backend selection.
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `in_memory` (default) | `postgres`
//! - `DATABASE_URL`: `PostgreSQL` connection URL (required when `STORAGE_MODE=postgres`)
//!
//! # Example
//!
//! ```ignore
//! let config = RepositoryConfig::from_env()?;
//! let repositories = RepositoryFactory::new(config).create().await?;
//!
//! let contacts = repositories.contacts.list().await?;
//! ```

use std::env;
use std::str::FromStr;
use std::sync::Arc;

use sqlx::PgPool;
use thiserror::Error;

use super::postgres::ensure_schema;
use super::{DocumentRepository, InMemoryCollection, PostgresCollection, RecordRepository};
use crate::domain::{Contact, DailyRecord, Ingredient, Recipe};

// =============================================================================
// Configuration Types
// =============================================================================

/// Storage backend for every collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// Process-local storage. Data is lost on restart.
    #[default]
    InMemory,
    /// `PostgreSQL` JSONB tables.
    Postgres,
}

impl FromStr for StorageMode {
    type Err = ConfigurationError;

    /// Parses a storage mode from a string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidStorageMode` if the string is not recognized.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            _ => Err(ConfigurationError::InvalidStorageMode(value.to_string())),
        }
    }
}

/// Configuration for [`RepositoryFactory`].
#[derive(Debug, Clone, Default)]
pub struct RepositoryConfig {
    pub storage_mode: StorageMode,
    /// `PostgreSQL` connection URL (required when `storage_mode` is `Postgres`).
    pub database_url: Option<String>,
}

impl RepositoryConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> RepositoryConfigBuilder {
        RepositoryConfigBuilder::default()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if `STORAGE_MODE` is invalid or
    /// `DATABASE_URL` is missing when `STORAGE_MODE=postgres`.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        let storage_mode = match env::var("STORAGE_MODE") {
            Ok(value) => value.parse()?,
            Err(env::VarError::NotPresent) => StorageMode::default(),
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigurationError::InvalidStorageMode(
                    "<non-UTF-8 value>".to_string(),
                ));
            }
        };

        // Empty or whitespace-only counts as unset
        let database_url = env::var("DATABASE_URL")
            .ok()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        let config = Self {
            storage_mode,
            database_url,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::MissingDatabaseUrl` if `PostgreSQL` is selected without a URL.
    pub const fn validate(&self) -> Result<(), ConfigurationError> {
        if matches!(self.storage_mode, StorageMode::Postgres) && self.database_url.is_none() {
            return Err(ConfigurationError::MissingDatabaseUrl);
        }
        Ok(())
    }
}

/// Builder for [`RepositoryConfig`].
#[derive(Debug, Clone, Default)]
pub struct RepositoryConfigBuilder {
    storage_mode: StorageMode,
    database_url: Option<String>,
}

impl RepositoryConfigBuilder {
    #[must_use]
    pub const fn storage_mode(mut self, mode: StorageMode) -> Self {
        self.storage_mode = mode;
        self
    }

    #[must_use]
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the configuration is invalid.
    pub fn build(self) -> Result<RepositoryConfig, ConfigurationError> {
        let config = RepositoryConfig {
            storage_mode: self.storage_mode,
            database_url: self.database_url,
        };

        config.validate()?;
        Ok(config)
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Errors in the storage configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Invalid storage mode: '{0}'. Expected 'in_memory' or 'postgres'")]
    InvalidStorageMode(String),

    #[error("DATABASE_URL environment variable is required when STORAGE_MODE=postgres")]
    MissingDatabaseUrl,
}

/// Errors that can occur during factory initialization.
#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Database connection error: {0}")]
    DatabaseConnection(String),

    /// Collection tables could not be created.
    #[error("Schema initialization error: {0}")]
    SchemaInitialization(String),
}

// =============================================================================
// Repository Factory
// =============================================================================

/// One repository per collection, shareable across request handlers.
#[derive(Clone)]
pub struct Repositories {
    pub records: Arc<dyn RecordRepository + Send + Sync>,
    pub daily_records: Arc<dyn DocumentRepository<DailyRecord> + Send + Sync>,
    pub contacts: Arc<dyn DocumentRepository<Contact> + Send + Sync>,
    pub ingredients: Arc<dyn DocumentRepository<Ingredient> + Send + Sync>,
    pub recipes: Arc<dyn DocumentRepository<Recipe> + Send + Sync>,
}

impl Repositories {
    /// Creates empty in-memory repositories.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            records: Arc::new(InMemoryCollection::new()),
            daily_records: Arc::new(InMemoryCollection::new()),
            contacts: Arc::new(InMemoryCollection::new()),
            ingredients: Arc::new(InMemoryCollection::new()),
            recipes: Arc::new(InMemoryCollection::new()),
        }
    }

    /// Creates `PostgreSQL`-backed repositories sharing one pool.
    #[must_use]
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            records: Arc::new(PostgresCollection::new(pool.clone())),
            daily_records: Arc::new(PostgresCollection::new(pool.clone())),
            contacts: Arc::new(PostgresCollection::new(pool.clone())),
            ingredients: Arc::new(PostgresCollection::new(pool.clone())),
            recipes: Arc::new(PostgresCollection::new(pool.clone())),
        }
    }
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Repositories")
            .field("records", &"Arc<dyn RecordRepository>")
            .field("daily_records", &"Arc<dyn DocumentRepository<DailyRecord>>")
            .field("contacts", &"Arc<dyn DocumentRepository<Contact>>")
            .field("ingredients", &"Arc<dyn DocumentRepository<Ingredient>>")
            .field("recipes", &"Arc<dyn DocumentRepository<Recipe>>")
            .finish()
    }
}

/// Creates the repository bundle selected by a [`RepositoryConfig`].
#[derive(Debug, Clone)]
pub struct RepositoryFactory {
    config: RepositoryConfig,
}

impl RepositoryFactory {
    #[must_use]
    pub const fn new(config: RepositoryConfig) -> Self {
        Self { config }
    }

    /// Creates all repositories based on the configuration.
    ///
    /// For `PostgreSQL` this connects and creates any missing collection tables.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError` if the database connection or schema setup fails.
    pub async fn create(&self) -> Result<Repositories, FactoryError> {
        match self.config.storage_mode {
            StorageMode::InMemory => Ok(Repositories::in_memory()),
            StorageMode::Postgres => {
                let pool = self.create_postgres_pool().await?;
                ensure_schema(&pool)
                    .await
                    .map_err(|error| FactoryError::SchemaInitialization(error.to_string()))?;
                Ok(Repositories::postgres(&pool))
            }
        }
    }

    async fn create_postgres_pool(&self) -> Result<PgPool, FactoryError> {
        let database_url = self
            .config
            .database_url
            .as_ref()
            .ok_or(ConfigurationError::MissingDatabaseUrl)?;

        PgPool::connect(database_url)
            .await
            .map_err(|error| FactoryError::DatabaseConnection(error.to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================
