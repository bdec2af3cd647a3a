use super::{LoadError, LoadReport, LoadResult};
use crate::logging::{log_value, sanitize_message};
use crate::model::status::Status;
use crate::model::user::User;
use crate::repo::error::RepoError;
use crate::repo::status_repo::StatusRepository;
use crate::repo::user_repo::UserRepository;
use crate::service::status_service::{StatusService, StatusServiceError};
use crate::service::user_service::{UserService, UserServiceError};
use csv::{ReaderBuilder, StringRecord};
use log::{debug, info, warn};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Instant;

/// Required header names for user files, in field order.
pub const USER_COLUMNS: [&str; 4] = ["USER_ID", "EMAIL", "NAME", "LASTNAME"];
/// Required header names for status files, in field order.
pub const STATUS_COLUMNS: [&str; 3] = ["STATUS_ID", "USER_ID", "STATUS_TEXT"];

const MAX_LOGGED_ROW_CHARS: usize = 120;

enum RowError {
    Rejected(String),
    Storage(RepoError),
}

/// Loads users from a UTF-8 CSV file.
pub fn load_users<S>(path: impl AsRef<Path>, users: &UserService<S>) -> LoadResult<LoadReport>
where
    S: UserRepository + StatusRepository,
{
    load_users_from_reader(open_source(path.as_ref())?, users)
}

/// Loads users from any CSV byte stream.
pub fn load_users_from_reader<R, S>(input: R, users: &UserService<S>) -> LoadResult<LoadReport>
where
    R: Read,
    S: UserRepository + StatusRepository,
{
    ingest("users", input, &USER_COLUMNS, |fields| {
        let [user_id, email, name, last_name] = fields else {
            return Err(RowError::Rejected("unexpected field count".to_string()));
        };
        let user = User::new(*user_id, *email, *name, *last_name);
        users.add_user(&user).map_err(|err| match err {
            UserServiceError::Repo(err) => RowError::Storage(err),
            other => RowError::Rejected(other.to_string()),
        })
    })
}

/// Loads statuses from a UTF-8 CSV file.
pub fn load_statuses<S>(
    path: impl AsRef<Path>,
    statuses: &StatusService<S>,
) -> LoadResult<LoadReport>
where
    S: UserRepository + StatusRepository,
{
    load_statuses_from_reader(open_source(path.as_ref())?, statuses)
}

/// Loads statuses from any CSV byte stream.
pub fn load_statuses_from_reader<R, S>(
    input: R,
    statuses: &StatusService<S>,
) -> LoadResult<LoadReport>
where
    R: Read,
    S: UserRepository + StatusRepository,
{
    ingest("statuses", input, &STATUS_COLUMNS, |fields| {
        let [status_id, user_id, text] = fields else {
            return Err(RowError::Rejected("unexpected field count".to_string()));
        };
        let status = Status::new(*status_id, *user_id, *text);
        statuses.add_status(&status).map_err(|err| match err {
            StatusServiceError::Repo(err) => RowError::Storage(err),
            other => RowError::Rejected(other.to_string()),
        })
    })
}

fn open_source(path: &Path) -> LoadResult<File> {
    File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })
}

fn ingest<R: Read>(
    kind: &'static str,
    input: R,
    columns: &[&'static str],
    mut insert: impl FnMut(&[&str]) -> Result<(), RowError>,
) -> LoadResult<LoadReport> {
    let started_at = Instant::now();
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(input);
    let indices = column_indices(reader.headers()?, columns)?;

    let mut report = LoadReport::default();
    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
        let line = record.position().map_or(0, |position| position.line());
        let Some(fields) = required_fields(&record, &indices) else {
            debug!("event=bulk_load module=loader status=skipped kind={kind} line={line}");
            report.skipped += 1;
            continue;
        };

        match insert(fields.as_slice()) {
            Ok(()) => report.inserted += 1,
            Err(RowError::Rejected(reason)) => {
                warn!(
                    "event=bulk_load module=loader status=rejected kind={kind} line={line} row={} reason={}",
                    sanitize_message(&fields.join(","), MAX_LOGGED_ROW_CHARS),
                    log_value(&reason)
                );
                report.rejected += 1;
            }
            Err(RowError::Storage(err)) => return Err(LoadError::Storage(err)),
        }
    }

    info!(
        "event=bulk_load module=loader status=ok kind={kind} inserted={} skipped={} rejected={} duration_ms={}",
        report.inserted,
        report.skipped,
        report.rejected,
        started_at.elapsed().as_millis()
    );
    Ok(report)
}

fn column_indices(headers: &StringRecord, columns: &[&'static str]) -> LoadResult<Vec<usize>> {
    columns
        .iter()
        .map(|&column| {
            headers
                .iter()
                .position(|header| header == column)
                .ok_or(LoadError::MissingColumn(column))
        })
        .collect()
}

/// Returns the required fields in column order, or `None` if any is
/// missing or empty.
fn required_fields<'r>(record: &'r StringRecord, indices: &[usize]) -> Option<Vec<&'r str>> {
    indices
        .iter()
        .map(|&index| record.get(index).filter(|value| !value.is_empty()))
        .collect()
}
