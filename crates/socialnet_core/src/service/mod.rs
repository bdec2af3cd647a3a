//! Record registries.
//!
//! # Responsibility
//! - Enforce uniqueness, length limits and owner references on top of the
//!   repository contracts.
//! - Keep callers decoupled from SQL and storage details.
//!
//! # Invariants
//! - Services hold no state besides the injected store handle.
//! - Rejections are typed errors; nothing is logged-and-swallowed here except
//!   per-row cascade failures, which are reported in `CascadeDeleteReport`.

pub mod status_service;
pub mod user_service;
