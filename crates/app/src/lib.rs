//! # autorank-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `AutomationRepository` — CRUD, listing, and batched rank writes
//!   - `EnvironmentRepository` — create and lookups
//! - Define **driving/inbound ports** as use-case structs:
//!   - `RankingEngine` — the named recompute-criticality operation
//!   - `AutomationService` — create, update ratio, delete, list
//!   - `EnvironmentService` — create, get, list
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `autorank-domain` only (plus `tokio::sync` for the mutation
//! lock). Never imports adapter crates. Adapters depend on *this* crate,
//! not the reverse.

pub mod ports;
pub mod ranking_engine;
pub mod services;
