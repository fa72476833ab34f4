//! API module for HTTP handlers.
//!
//! This module contains route definitions, request DTOs and the handlers for
//! each resource.

pub mod contacts;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod ingredients;
pub mod ledger;
pub mod recipes;
pub mod routes;

pub use error::{ApiError, ApiErrorResponse, ValidationError};
pub use extract::JsonBody;
pub use handlers::{AppState, HealthResponse, health_check};
pub use routes::create_router;
