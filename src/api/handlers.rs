//! Application state and service-level handlers.

use std::sync::Arc;

use axum::Json;

use crate::domain::{Contact, DailyRecord, Ingredient, Recipe};
use crate::infrastructure::{DocumentRepository, RecordRepository, Repositories};

// =============================================================================
// Application State
// =============================================================================

/// Shared application dependencies.
///
/// Holds one trait object per collection so the backend can be chosen at
/// runtime by the `RepositoryFactory`.
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<dyn RecordRepository + Send + Sync>,
    pub daily_records: Arc<dyn DocumentRepository<DailyRecord> + Send + Sync>,
    pub contacts: Arc<dyn DocumentRepository<Contact> + Send + Sync>,
    pub ingredients: Arc<dyn DocumentRepository<Ingredient> + Send + Sync>,
    pub recipes: Arc<dyn DocumentRepository<Recipe> + Send + Sync>,
}

impl AppState {
    /// Creates a new `AppState` from initialized repositories.
    #[must_use]
    pub fn from_repositories(repositories: Repositories) -> Self {
        Self {
            records: repositories.records,
            daily_records: repositories.daily_records,
            contacts: repositories.contacts,
            ingredients: repositories.ingredients,
            recipes: repositories.recipes,
        }
    }

    /// Creates an `AppState` over empty in-memory collections.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_repositories(Repositories::in_memory())
    }
}

// =============================================================================
// GET / and GET /health
// =============================================================================

/// Plain-text liveness banner.
pub async fn root() -> &'static str {
    "API funcionando correctamente"
}

/// Health check response body.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint.
///
/// ```json
/// { "status": "healthy", "version": "0.1.0" }
/// ```
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}
