//! # getdub-api
//!
//! REST backend for a small business: ledger records with nested
//! transactions, daily records, contacts, ingredients and recipes whose
//! composition references ingredients.
//!
//! ## Layout
//!
//! - [`domain`]: document types and their pure operations
//! - [`infrastructure`]: repository traits with in-memory and `PostgreSQL` backends
//! - [`api`]: request validation, handlers and routing
//! - [`server`]: bind address and graceful shutdown

#![forbid(unsafe_code)]

pub mod api;
pub mod domain;
pub mod infrastructure;
pub mod server;
