//! Repository layer: the persistence provider consumed by services.
//!
//! # Responsibility
//! - Define per-collection data access contracts for users and statuses.
//! - Keep SQL details out of service orchestration.
//!
//! # Invariants
//! - Repositories never enforce cross-collection rules; services do.
//! - Multi-write operations run inside one SQLite transaction.
//! - Unique-index violations surface as `RepoError::UniqueViolation`.

pub mod error;
pub mod sqlite_store;
pub mod status_repo;
pub mod user_repo;
