//! User profile record.
//!
//! # Invariants
//! - `user_id` is stable once created; updates rewrite every other field.
//! - Length limits are counted in Unicode scalar values.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Maximum length of `user_id`.
pub const USER_ID_MAX_CHARS: usize = 30;
/// Maximum length of `name`.
pub const USER_NAME_MAX_CHARS: usize = 30;
/// Maximum length of `last_name`.
pub const USER_LAST_NAME_MAX_CHARS: usize = 100;

/// One user profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Caller-chosen unique handle.
    pub user_id: String,
    pub email: String,
    /// Display name.
    pub name: String,
    pub last_name: String,
}

/// Field-level validation failure for [`User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    FieldTooLong {
        field: &'static str,
        max_chars: usize,
        actual_chars: usize,
    },
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FieldTooLong {
                field,
                max_chars,
                actual_chars,
            } => write!(
                f,
                "user field `{field}` has {actual_chars} characters; maximum is {max_chars}"
            ),
        }
    }
}

impl Error for UserValidationError {}

impl User {
    pub fn new(
        user_id: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            name: name.into(),
            last_name: last_name.into(),
        }
    }

    /// Checks the length limits of `user_id`, `name` and `last_name`.
    ///
    /// The first violated limit is reported; `email` is not limited.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        check_length("user_id", &self.user_id, USER_ID_MAX_CHARS)?;
        check_length("name", &self.name, USER_NAME_MAX_CHARS)?;
        check_length("last_name", &self.last_name, USER_LAST_NAME_MAX_CHARS)?;
        Ok(())
    }
}

fn check_length(
    field: &'static str,
    value: &str,
    max_chars: usize,
) -> Result<(), UserValidationError> {
    let actual_chars = value.chars().count();
    if actual_chars > max_chars {
        return Err(UserValidationError::FieldTooLong {
            field,
            max_chars,
            actual_chars,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{User, UserValidationError, USER_ID_MAX_CHARS, USER_LAST_NAME_MAX_CHARS};

    #[test]
    fn limits_are_inclusive() {
        let user = User::new(
            "u".repeat(USER_ID_MAX_CHARS),
            "a@b.c",
            "n".repeat(30),
            "l".repeat(USER_LAST_NAME_MAX_CHARS),
        );
        assert!(user.validate().is_ok());
    }

    #[test]
    fn over_long_id_is_rejected() {
        let user = User::new("u".repeat(31), "a@b.c", "Sesame", "Chan");
        assert_eq!(
            user.validate(),
            Err(UserValidationError::FieldTooLong {
                field: "user_id",
                max_chars: 30,
                actual_chars: 31,
            })
        );
    }

    #[test]
    fn over_long_last_name_is_rejected() {
        let user = User::new("SC", "a@b.c", "Sesame", "x".repeat(101));
        let err = user.validate().unwrap_err();
        assert!(err.to_string().contains("last_name"));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let user = User::new("SC", "a@b.c", "é".repeat(30), "Chan");
        assert!(user.validate().is_ok());
    }

    #[test]
    fn email_is_not_length_limited() {
        let user = User::new("SC", "e".repeat(500), "Sesame", "Chan");
        assert!(user.validate().is_ok());
    }
}
