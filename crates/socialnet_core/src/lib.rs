//! Core record layer for the social network store.
//! Owns user/status invariants, cascade deletes and CSV ingestion.

pub mod api;
pub mod config;
pub mod db;
pub mod loader;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use api::SocialNetwork;
pub use config::{load_config, AppConfig, ConfigError};
pub use loader::{LoadError, LoadReport};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::status::Status;
pub use model::user::{User, UserValidationError};
pub use repo::error::{RepoError, RepoResult};
pub use repo::sqlite_store::SqliteSocialStore;
pub use repo::status_repo::StatusRepository;
pub use repo::user_repo::UserRepository;
pub use service::status_service::{StatusService, StatusServiceError};
pub use service::user_service::{CascadeDeleteReport, UserService, UserServiceError};
