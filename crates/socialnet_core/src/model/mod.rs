//! Domain records for the social network store.
//!
//! # Invariants
//! - Users and statuses are identified by caller-provided string ids.
//! - A status always names its owning user by `user_id`.

pub mod status;
pub mod user;
