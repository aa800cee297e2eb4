//! # autorank-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the repository port traits defined in `autorank-app::ports`
//! - Manage `SQLite` connection pool lifecycle
//! - Run database migrations (using sqlx embedded migrations)
//! - Map between domain types and database rows
//! - Translate unique-constraint violations into domain conflicts
//!
//! ## Dependency rule
//! Depends on `autorank-app` (for port traits) and `autorank-domain` (for
//! domain types). The `app` and `domain` crates must never reference this
//! adapter.

pub mod automation_repo;
pub mod environment_repo;
pub mod error;
pub mod pool;

pub use automation_repo::SqliteAutomationRepository;
pub use environment_repo::SqliteEnvironmentRepository;
pub use error::StorageError;
pub use pool::{Config, Database};
