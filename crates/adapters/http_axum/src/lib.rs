//! # autorank-adapter-http-axum
//!
//! HTTP adapter using [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Expose the REST API for environments and automations
//! - Map domain errors to HTTP status codes and JSON error bodies
//! - Translate query parameters into validated domain list queries
//!
//! ## Dependency rule
//! Depends on `autorank-app` (for services and port traits) and
//! `autorank-domain` (for domain types). The `app` and `domain` crates
//! must never reference this adapter.

pub mod api;
pub mod error;
pub mod router;
pub mod state;
