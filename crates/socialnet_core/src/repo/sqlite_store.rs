//! SQLite-backed implementation of the user and status repositories.
//!
//! # Responsibility
//! - Map `users`/`statuses` rows to domain records.
//! - Scope multi-write operations in transactions.
//!
//! # Invariants
//! - Construction fails unless the connection is fully migrated.
//! - Lookups go through the unique indexes on `user_id`/`status_id`.

use crate::db::migrations::latest_version;
use crate::model::status::Status;
use crate::model::user::User;
use crate::repo::error::{RepoError, RepoResult};
use crate::repo::status_repo::StatusRepository;
use crate::repo::user_repo::UserRepository;
use rusqlite::{params, Connection, OptionalExtension, Row};

const USER_SELECT_SQL: &str = "SELECT
    user_id,
    user_email,
    user_name,
    user_last_name
FROM users";

const STATUS_SELECT_SQL: &str = "SELECT
    status_id,
    user_id,
    status_text
FROM statuses";

const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    (
        "users",
        &["user_id", "user_email", "user_name", "user_last_name"],
    ),
    ("statuses", &["status_id", "user_id", "status_text"]),
];

/// Store handle over one migrated connection.
///
/// Cheap to copy; every registry gets its own copy of the same handle.
#[derive(Debug, Clone, Copy)]
pub struct SqliteSocialStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSocialStore<'conn> {
    /// Constructs a store from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteSocialStore<'_> {
    fn find_user(&self, user_id: &str) -> RepoResult<Option<User>> {
        let user = self
            .conn
            .query_row(
                &format!("{USER_SELECT_SQL} WHERE user_id = ?1;"),
                [user_id],
                parse_user_row,
            )
            .optional()?;
        Ok(user)
    }

    fn insert_user(&self, user: &User) -> RepoResult<()> {
        self.conn
            .execute(
                "INSERT INTO users (
                    user_id,
                    user_email,
                    user_name,
                    user_last_name
                ) VALUES (?1, ?2, ?3, ?4);",
                params![
                    user.user_id.as_str(),
                    user.email.as_str(),
                    user.name.as_str(),
                    user.last_name.as_str(),
                ],
            )
            .map_err(|err| RepoError::from_write(err, "users", &user.user_id))?;
        Ok(())
    }

    fn update_user(&self, user: &User) -> RepoResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            "UPDATE users
             SET
                user_id = ?1,
                user_email = ?2,
                user_name = ?3,
                user_last_name = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE user_id = ?1;",
            params![
                user.user_id.as_str(),
                user.email.as_str(),
                user.name.as_str(),
                user.last_name.as_str(),
            ],
        )?;
        tx.commit()?;
        Ok(changed)
    }

    fn delete_user(&self, user_id: &str) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM users WHERE user_id = ?1;", [user_id])?;
        Ok(changed > 0)
    }
}

impl StatusRepository for SqliteSocialStore<'_> {
    fn find_status(&self, status_id: &str) -> RepoResult<Option<Status>> {
        let status = self
            .conn
            .query_row(
                &format!("{STATUS_SELECT_SQL} WHERE status_id = ?1;"),
                [status_id],
                parse_status_row,
            )
            .optional()?;
        Ok(status)
    }

    fn find_statuses_by_user(&self, user_id: &str) -> RepoResult<Vec<Status>> {
        let mut stmt = self.conn.prepare(&format!(
            "{STATUS_SELECT_SQL}
             WHERE user_id = ?1
             ORDER BY status_id ASC;"
        ))?;
        let mut rows = stmt.query([user_id])?;
        let mut statuses = Vec::new();
        while let Some(row) = rows.next()? {
            statuses.push(parse_status_row(row)?);
        }
        Ok(statuses)
    }

    fn insert_status(&self, status: &Status) -> RepoResult<()> {
        self.conn
            .execute(
                "INSERT INTO statuses (
                    status_id,
                    user_id,
                    status_text
                ) VALUES (?1, ?2, ?3);",
                params![
                    status.status_id.as_str(),
                    status.user_id.as_str(),
                    status.text.as_str(),
                ],
            )
            .map_err(|err| RepoError::from_write(err, "statuses", &status.status_id))?;
        Ok(())
    }

    fn update_status(&self, status: &Status) -> RepoResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            "UPDATE statuses
             SET
                status_id = ?1,
                user_id = ?2,
                status_text = ?3,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE status_id = ?1;",
            params![
                status.status_id.as_str(),
                status.user_id.as_str(),
                status.text.as_str(),
            ],
        )?;
        tx.commit()?;
        Ok(changed)
    }

    fn delete_status(&self, status_id: &str) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM statuses WHERE status_id = ?1;", [status_id])?;
        Ok(changed > 0)
    }

    fn delete_orphaned_statuses(&self) -> RepoResult<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let removed = tx.execute(
            "DELETE FROM statuses
             WHERE NOT EXISTS (
                SELECT 1
                FROM users u
                WHERE u.user_id = statuses.user_id
             );",
            [],
        )?;
        tx.commit()?;
        Ok(removed)
    }
}

fn parse_user_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        user_id: row.get("user_id")?,
        email: row.get("user_email")?,
        name: row.get("user_name")?,
        last_name: row.get("user_last_name")?,
    })
}

fn parse_status_row(row: &Row<'_>) -> rusqlite::Result<Status> {
    Ok(Status {
        status_id: row.get("status_id")?,
        user_id: row.get("user_id")?,
        text: row.get("status_text")?,
    })
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &(table, columns) in REQUIRED_COLUMNS {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(RepoError::MissingRequiredColumn { table, column });
            }
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
