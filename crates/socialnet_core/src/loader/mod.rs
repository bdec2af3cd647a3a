//! Bulk ingestion of users and statuses from CSV files.
//!
//! # Responsibility
//! - Read header-named CSV rows and hand complete rows to the registries.
//! - Count inserted, skipped and rejected rows.
//!
//! # Invariants
//! - Rows with a missing or empty required field are skipped.
//! - Registry rejections (duplicates, invalid lengths, unknown owners) are
//!   logged and loading continues, for users and statuses alike.
//! - Unreadable input, a missing header column or a storage error aborts the
//!   load; rows inserted before the abort stay inserted.

use crate::repo::error::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

mod csv_loader;

pub use csv_loader::{
    load_statuses, load_statuses_from_reader, load_users, load_users_from_reader,
    STATUS_COLUMNS, USER_COLUMNS,
};

pub type LoadResult<T> = Result<T, LoadError>;

/// Per-load row counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Rows accepted by the registry.
    pub inserted: usize,
    /// Rows missing a required field.
    pub skipped: usize,
    /// Complete rows the registry refused.
    pub rejected: usize,
}

/// Load-level failure.
#[derive(Debug)]
pub enum LoadError {
    /// The source file cannot be opened.
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The header row lacks a required column.
    MissingColumn(&'static str),
    /// The CSV stream is malformed or unreadable.
    Csv(csv::Error),
    /// The store failed while inserting a row.
    Storage(RepoError),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "cannot open `{}`: {source}", path.display())
            }
            Self::MissingColumn(column) => write!(f, "missing required column `{column}`"),
            Self::Csv(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::MissingColumn(_) => None,
            Self::Csv(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<csv::Error> for LoadError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}
